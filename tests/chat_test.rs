// ABOUTME: Integration tests for the nutritionist chat service
// ABOUTME: Covers turn persistence, the context window, profile grounding, and delete/clear
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use common::{test_store, FakeTips};
use fittrack_core::errors::ErrorCode;
use fittrack_core::models::{ChatRole, GoalType, UserBiometrics};
use fittrack_core::services::ChatService;
use fittrack_core::store::RecordStore;

#[tokio::test]
async fn test_send_message_persists_both_turns() -> Result<()> {
    let store = test_store();
    let generator = FakeTips::saying("Aim for about 1.6g of protein per kg of body weight.");
    let service = ChatService::new(Arc::clone(&store), generator.clone());
    let user_id = Uuid::new_v4();

    let reply = service
        .send_message(user_id, "How much protein should I eat?")
        .await?;
    assert_eq!(reply.role, ChatRole::Assistant);
    assert_eq!(
        reply.content,
        "Aim for about 1.6g of protein per kg of body weight."
    );

    let history = service.history(user_id).await?;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content, "How much protein should I eat?");
    assert_eq!(history[1].id, reply.id);

    Ok(())
}

#[tokio::test]
async fn test_prompt_grounded_in_profile() -> Result<()> {
    let store = test_store();
    let user_id = Uuid::new_v4();

    let mut profile = UserBiometrics::new(user_id);
    profile.weight_kg = Some(80.0);
    profile.goal_type = Some(GoalType::Deficit);
    profile.daily_calorie_intake = Some(2000.0);
    store.save_biometrics(profile).await?;

    let generator = FakeTips::saying("Plenty of options within your target.");
    let service = ChatService::new(Arc::clone(&store), generator.clone());

    service.send_message(user_id, "What should I have for dinner?").await?;

    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.contains("- Weight: 80 kg"));
    assert!(prompt.contains("- Main Goal: Calorie Deficit"));
    assert!(prompt.contains("- Daily Calorie Target: 2000 kcal"));
    assert!(prompt.contains("User: What should I have for dinner?"));
    assert!(prompt.contains("Do NOT invent measurements"));

    Ok(())
}

#[tokio::test]
async fn test_context_window_keeps_last_five_messages() -> Result<()> {
    let store = test_store();
    let generator = FakeTips::saying("Noted.");
    let service = ChatService::new(Arc::clone(&store), generator.clone());
    let user_id = Uuid::new_v4();

    // Four exchanges persist eight messages.
    for i in 1..=4 {
        service.send_message(user_id, &format!("question {i}")).await?;
    }
    service.send_message(user_id, "question five").await?;

    // The final prompt carries only the trailing five persisted messages:
    // the "question 1" exchange and the user half of "question 2" fall out.
    let prompt = generator.last_prompt().unwrap();
    assert!(!prompt.contains("question 1"));
    assert!(!prompt.contains("User: question 2"));
    assert!(prompt.contains("question 3"));
    assert!(prompt.contains("question 4"));
    assert!(prompt.contains("User: question five"));

    Ok(())
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let service = ChatService::new(test_store(), FakeTips::saying("unused"));
    let err = service
        .send_message(Uuid::new_v4(), "   ")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_failed_generation_leaves_history_unchanged() -> Result<()> {
    let store = test_store();
    let service = ChatService::new(Arc::clone(&store), FakeTips::failing());
    let user_id = Uuid::new_v4();

    let err = service
        .send_message(user_id, "Is rice healthy?")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(service.history(user_id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_and_clear_conversation() -> Result<()> {
    let store = test_store();
    let service = ChatService::new(Arc::clone(&store), FakeTips::saying("Sure."));
    let user_id = Uuid::new_v4();

    service.send_message(user_id, "first").await?;
    let reply = service.send_message(user_id, "second").await?;

    service.delete_message(user_id, reply.id).await?;
    let history = service.history(user_id).await?;
    assert_eq!(history.len(), 3);
    assert!(history.iter().all(|m| m.id != reply.id));

    let err = service
        .delete_message(user_id, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    service.clear(user_id).await?;
    assert!(service.history(user_id).await?.is_empty());

    Ok(())
}
