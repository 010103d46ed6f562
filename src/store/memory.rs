// ABOUTME: In-memory record store backed by DashMap, used for tests and embedding
// ABOUTME: Implements duplicate (user,date) detection and date-range scans
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! In-memory [`RecordStore`] implementation.
//!
//! Keyed `DashMap`s per entity. Range scans filter and sort, which is fine at
//! personal-tracker scale; a SQL-backed implementation would push the range
//! predicate into the query instead.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use super::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    ChatMessage, FoodItem, MealEntry, MealType, SleepEntry, StepEntry, UserBiometrics, UserGoals,
    WaterEntry, WeightEntry, WorkoutEntry,
};

type DayKey = (Uuid, NaiveDate);
type MealKey = (Uuid, NaiveDate, MealType);

/// In-memory record store
#[derive(Debug, Default)]
pub struct MemoryStore {
    weights: DashMap<DayKey, WeightEntry>,
    steps: DashMap<DayKey, StepEntry>,
    water: DashMap<DayKey, WaterEntry>,
    sleep: DashMap<DayKey, SleepEntry>,
    meals: DashMap<MealKey, MealEntry>,
    workouts: DashMap<Uuid, Vec<WorkoutEntry>>,
    chats: DashMap<Uuid, Vec<ChatMessage>>,
    foods: DashMap<Uuid, FoodItem>,
    food_names: DashMap<String, Uuid>,
    biometrics: DashMap<Uuid, UserBiometrics>,
    goals: DashMap<Uuid, UserGoals>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_unique<V: Clone>(
        map: &DashMap<DayKey, V>,
        key: DayKey,
        value: V,
        resource: &str,
        date: NaiveDate,
    ) -> AppResult<()> {
        match map.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(AppError::already_exists(format!("{resource} for {date}")))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    fn range_scan<V: Clone>(
        map: &DashMap<DayKey, V>,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        date_of: impl Fn(&V) -> NaiveDate,
    ) -> Vec<V> {
        let mut entries: Vec<V> = map
            .iter()
            .filter(|kv| {
                let (user, date) = *kv.key();
                user == user_id && date >= start && date <= end
            })
            .map(|kv| kv.value().clone())
            .collect();
        entries.sort_by_key(|v| date_of(v));
        entries
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert_weight(&self, entry: WeightEntry) -> AppResult<()> {
        let key = (entry.user_id, entry.date);
        Self::insert_unique(&self.weights, key, entry, "weight entry", key.1)
    }

    async fn get_weight(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WeightEntry>> {
        Ok(self.weights.get(&(user_id, date)).map(|e| e.clone()))
    }

    async fn weight_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WeightEntry>> {
        Ok(Self::range_scan(&self.weights, user_id, start, end, |e| {
            e.date
        }))
    }

    async fn insert_steps(&self, entry: StepEntry) -> AppResult<()> {
        let key = (entry.user_id, entry.date);
        Self::insert_unique(&self.steps, key, entry, "step entry", key.1)
    }

    async fn update_steps(&self, entry: StepEntry) -> AppResult<()> {
        let key = (entry.user_id, entry.date);
        match self.steps.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(mut slot) => {
                slot.insert(entry);
                Ok(())
            }
            dashmap::mapref::entry::Entry::Vacant(_) => Err(AppError::not_found(format!(
                "step entry for {}",
                key.1
            ))),
        }
    }

    async fn get_steps(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<StepEntry>> {
        Ok(self.steps.get(&(user_id, date)).map(|e| e.clone()))
    }

    async fn steps_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<StepEntry>> {
        Ok(Self::range_scan(&self.steps, user_id, start, end, |e| {
            e.date
        }))
    }

    async fn insert_water(&self, entry: WaterEntry) -> AppResult<()> {
        let key = (entry.user_id, entry.date);
        Self::insert_unique(&self.water, key, entry, "water entry", key.1)
    }

    async fn get_water(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<WaterEntry>> {
        Ok(self.water.get(&(user_id, date)).map(|e| e.clone()))
    }

    async fn water_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WaterEntry>> {
        Ok(Self::range_scan(&self.water, user_id, start, end, |e| {
            e.date
        }))
    }

    async fn insert_sleep(&self, entry: SleepEntry) -> AppResult<()> {
        let key = (entry.user_id, entry.date);
        Self::insert_unique(&self.sleep, key, entry, "sleep entry", key.1)
    }

    async fn get_sleep(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Option<SleepEntry>> {
        Ok(self.sleep.get(&(user_id, date)).map(|e| e.clone()))
    }

    async fn sleep_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<SleepEntry>> {
        Ok(Self::range_scan(&self.sleep, user_id, start, end, |e| {
            e.date
        }))
    }

    async fn get_meal(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        meal_type: MealType,
    ) -> AppResult<Option<MealEntry>> {
        Ok(self
            .meals
            .get(&(user_id, date, meal_type))
            .map(|e| e.clone()))
    }

    async fn save_meal(&self, entry: MealEntry) -> AppResult<()> {
        self.meals
            .insert((entry.user_id, entry.date, entry.meal_type), entry);
        Ok(())
    }

    async fn meals_for_date(&self, user_id: Uuid, date: NaiveDate) -> AppResult<Vec<MealEntry>> {
        let mut meals: Vec<MealEntry> = self
            .meals
            .iter()
            .filter(|kv| {
                let (user, day, _) = *kv.key();
                user == user_id && day == date
            })
            .map(|kv| kv.value().clone())
            .collect();
        meals.sort_by_key(|m| m.meal_type.as_str());
        Ok(meals)
    }

    async fn meals_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<MealEntry>> {
        let mut meals: Vec<MealEntry> = self
            .meals
            .iter()
            .filter(|kv| {
                let (user, day, _) = *kv.key();
                user == user_id && day >= start && day <= end
            })
            .map(|kv| kv.value().clone())
            .collect();
        meals.sort_by_key(|m| m.date);
        Ok(meals)
    }

    async fn insert_workout(&self, entry: WorkoutEntry) -> AppResult<()> {
        self.workouts.entry(entry.user_id).or_default().push(entry);
        Ok(())
    }

    async fn workouts_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Vec<WorkoutEntry>> {
        Ok(self.workouts.get(&user_id).map_or_else(Vec::new, |list| {
            list.iter().filter(|w| w.date == date).cloned().collect()
        }))
    }

    async fn workouts_in_range(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<WorkoutEntry>> {
        let mut workouts = self.workouts.get(&user_id).map_or_else(Vec::new, |list| {
            list.iter()
                .filter(|w| w.date >= start && w.date <= end)
                .cloned()
                .collect::<Vec<_>>()
        });
        workouts.sort_by_key(|w| w.date);
        Ok(workouts)
    }

    async fn append_chat_message(&self, message: ChatMessage) -> AppResult<()> {
        self.chats.entry(message.user_id).or_default().push(message);
        Ok(())
    }

    async fn chat_history(&self, user_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        Ok(self
            .chats
            .get(&user_id)
            .map_or_else(Vec::new, |list| list.clone()))
    }

    async fn delete_chat_message(&self, user_id: Uuid, message_id: Uuid) -> AppResult<()> {
        let mut removed = false;
        if let Some(mut list) = self.chats.get_mut(&user_id) {
            let before = list.len();
            list.retain(|m| m.id != message_id);
            removed = list.len() < before;
        }
        if removed {
            Ok(())
        } else {
            Err(AppError::not_found("chat message"))
        }
    }

    async fn clear_chat(&self, user_id: Uuid) -> AppResult<()> {
        self.chats.remove(&user_id);
        Ok(())
    }

    async fn insert_food(&self, item: FoodItem) -> AppResult<()> {
        self.food_names.insert(item.name.clone(), item.id);
        self.foods.insert(item.id, item);
        Ok(())
    }

    async fn get_food(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        Ok(self.foods.get(&id).map(|f| f.clone()))
    }

    async fn find_food_by_name(&self, name: &str) -> AppResult<Option<FoodItem>> {
        Ok(self
            .food_names
            .get(name)
            .and_then(|id| self.foods.get(&id).map(|f| f.clone())))
    }

    async fn get_biometrics(&self, user_id: Uuid) -> AppResult<Option<UserBiometrics>> {
        Ok(self.biometrics.get(&user_id).map(|b| b.clone()))
    }

    async fn save_biometrics(&self, biometrics: UserBiometrics) -> AppResult<()> {
        self.biometrics.insert(biometrics.user_id, biometrics);
        Ok(())
    }

    async fn get_goals(&self, user_id: Uuid) -> AppResult<UserGoals> {
        Ok(self
            .goals
            .get(&user_id)
            .map_or_else(|| UserGoals::default_for(user_id), |g| g.clone()))
    }

    async fn save_goals(&self, goals: UserGoals) -> AppResult<()> {
        self.goals.insert(goals.user_id, goals);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> Uuid {
        Uuid::new_v4()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_duplicate_weight_rejected() {
        let store = MemoryStore::new();
        let user_id = user();
        let entry = WeightEntry {
            user_id,
            date: date(1),
            weight_kg: 82.5,
        };
        store.insert_weight(entry.clone()).await.unwrap();
        let err = store.insert_weight(entry).await.unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ResourceAlreadyExists);
    }

    #[tokio::test]
    async fn test_range_scan_sorted_and_filtered() {
        let store = MemoryStore::new();
        let user_id = user();
        for day in [5, 2, 9] {
            store
                .insert_sleep(SleepEntry {
                    user_id,
                    date: date(day),
                    duration_hours: 7.5,
                })
                .await
                .unwrap();
        }
        let entries = store
            .sleep_in_range(user_id, date(1), date(6))
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date(2));
        assert_eq!(entries[1].date, date(5));
    }

    #[tokio::test]
    async fn test_goals_default_when_unset() {
        let store = MemoryStore::new();
        let goals = store.get_goals(user()).await.unwrap();
        assert_eq!(goals.step_goal, 8000);
    }

    #[tokio::test]
    async fn test_food_lookup_by_name() {
        let store = MemoryStore::new();
        let item = FoodItem {
            id: Uuid::new_v4(),
            name: "banana".to_owned(),
            calories: 89.0,
            protein: 1.1,
            carbs: 22.8,
            fats: 0.3,
        };
        store.insert_food(item.clone()).await.unwrap();
        let found = store.find_food_by_name("banana").await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(item.id));
        assert!(store.find_food_by_name("apple").await.unwrap().is_none());
    }
}
