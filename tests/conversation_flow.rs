//! End-to-end conversation tests: onboarding, the terms gate, the visit
//! request workflow and its resolution paths.

#![allow(non_snake_case)]

mod common;

use assert_matches::assert_matches;

use common::{click, onboard, seed_admin, test_bot, text_from};
use ClubPass::keyboards;
use ClubPass::models::RequestStatus;
use ClubPass::store::LedgerStore;
use ClubPass::texts;
use ClubPass::transport::KeyboardSpec;

#[tokio::test]
async fn first_contact_creates_a_participant_and_prompts_the_terms() {
    let bot = test_bot();

    bot.dispatcher
        .handle_text(text_from(100, "/start"))
        .await
        .unwrap();

    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert!(!participant.terms_accepted);
    assert_eq!(participant.games_played, 0);

    let sent = bot.transport.sent_to(100);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, texts::terms_prompt());
    assert_eq!(sent[0].keyboard, Some(keyboards::terms()));
}

#[tokio::test]
async fn any_text_other_than_the_acceptance_phrase_reprompts() {
    let bot = test_bot();

    bot.dispatcher
        .handle_text(text_from(100, "/start"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, "hello there"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    let sent = bot.transport.sent_to(100);
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|m| m.text == texts::terms_prompt()));

    // The menu label did not create a request while the gate was closed.
    assert!(bot.store.get_visit_request(1).await.unwrap().is_none());
}

#[tokio::test]
async fn accepting_the_terms_opens_the_menu() {
    let bot = test_bot();

    bot.dispatcher
        .handle_text(text_from(100, "/start"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, texts::ACCEPT_TERMS_LABEL))
        .await
        .unwrap();

    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert!(participant.terms_accepted);

    let sent = bot.transport.sent_to(100);
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1].text, texts::terms_accepted());
    assert_eq!(sent[2].text, texts::welcome());
    assert_eq!(sent[2].keyboard, Some(keyboards::main_menu()));
}

#[tokio::test]
async fn stats_and_bonus_labels_reply_with_the_ledger_state() {
    let bot = test_bot();
    onboard(&bot, 100).await;

    bot.dispatcher
        .handle_text(text_from(100, texts::MY_STATS_LABEL))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, texts::BONUS_LABEL))
        .await
        .unwrap();

    let sent = bot.transport.sent_to(100);
    let stats = &sent[sent.len() - 2].text;
    let bonus = &sent[sent.len() - 1].text;
    assert!(stats.contains("Visits recorded: 0"));
    assert!(stats.contains("Bonus points: 0"));
    assert!(bonus.contains("Your points: 0"));
}

#[tokio::test]
async fn unrecognized_text_from_an_active_user_is_silently_ignored() {
    let bot = test_bot();
    onboard(&bot, 100).await;
    let sent_before = bot.transport.sent().len();

    bot.dispatcher
        .handle_text(text_from(100, "what is this"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, "/admin_list"))
        .await
        .unwrap();

    // No replies at all: unknown text and admin commands from non-admins fall
    // through without an error message.
    assert_eq!(bot.transport.sent().len(), sent_before);
}

#[tokio::test]
async fn a_visit_request_reaches_every_administrator() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    seed_admin(&bot.store, 2).await;
    onboard(&bot, 100).await;

    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    // Ledger: pending flag set, pending row recorded.
    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert!(participant.has_pending_request);
    let request = bot.store.get_visit_request(1).await.unwrap().unwrap();
    assert_eq!(request.chat_id, 100);
    assert_eq!(request.status, RequestStatus::Pending);

    // The originator got a confirmation.
    assert_eq!(
        bot.transport.last_text_to(100),
        Some(texts::request_submitted())
    );

    // Both admins got the notification with approve/reject controls.
    for admin_id in [1, 2] {
        let messages = bot.transport.sent_to(admin_id);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].text.contains("Request ID: 1"));
        assert_eq!(messages[0].keyboard, Some(keyboards::approve_reject(1)));
    }
}

#[tokio::test]
async fn approval_credits_the_member_and_notifies_them() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    onboard(&bot, 100).await;
    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    let admin_message = &bot.transport.sent_to(1)[0];
    bot.dispatcher
        .handle_button(click(1, admin_message.message_id, 1, "approve_1"))
        .await
        .unwrap();

    // Ledger side effects.
    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert_eq!(participant.games_played, 1);
    assert_eq!(participant.bonus_points, 10);
    assert!(!participant.has_pending_request);

    let request = bot.store.get_visit_request(1).await.unwrap().unwrap();
    assert_eq!(request.status, RequestStatus::Approved);
    assert_eq!(request.resolved_by, Some(1));

    // The member got the approval notice plus refreshed stats.
    let member_messages = bot.transport.sent_to(100);
    let last_two: Vec<&str> = member_messages
        .iter()
        .rev()
        .take(2)
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(last_two[1], texts::request_approved_notice());
    assert!(last_two[0].contains("Visits recorded: 1"));
    assert!(last_two[0].contains("Bonus points: 10"));

    // The click was acknowledged and the stale controls were edited away.
    assert_eq!(
        bot.transport.acks(),
        vec![("cb-approve_1".to_string(), texts::approve_ack())]
    );
    assert_eq!(
        bot.transport.edits(),
        vec![(
            1,
            admin_message.message_id,
            texts::resolved_admin_message(1, true)
        )]
    );
}

#[tokio::test]
async fn rejection_notifies_without_crediting() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    onboard(&bot, 100).await;
    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    let admin_message = &bot.transport.sent_to(1)[0];
    bot.dispatcher
        .handle_button(click(1, admin_message.message_id, 1, "reject_1"))
        .await
        .unwrap();

    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert_eq!(participant.games_played, 0);
    assert_eq!(participant.bonus_points, 0);
    assert!(!participant.has_pending_request);

    assert_eq!(
        bot.store.get_visit_request(1).await.unwrap().unwrap().status,
        RequestStatus::Rejected
    );
    assert_eq!(
        bot.transport.last_text_to(100),
        Some(texts::request_rejected_notice())
    );
}

#[tokio::test]
async fn a_second_request_is_refused_while_one_is_pending() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    onboard(&bot, 100).await;

    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    assert_eq!(
        bot.transport.last_text_to(100),
        Some(texts::request_already_pending())
    );
    // One notification only, one request row only.
    assert_eq!(bot.transport.sent_to(1).len(), 1);
    assert!(bot.store.get_visit_request(2).await.unwrap().is_none());
}

#[tokio::test]
async fn a_second_click_does_not_double_credit() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    seed_admin(&bot.store, 2).await;
    onboard(&bot, 100).await;
    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    let first = &bot.transport.sent_to(1)[0];
    let second = &bot.transport.sent_to(2)[0];
    bot.dispatcher
        .handle_button(click(1, first.message_id, 1, "approve_1"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_button(click(2, second.message_id, 2, "approve_1"))
        .await
        .unwrap();

    let participant = bot.store.get_participant(100).await.unwrap().unwrap();
    assert_eq!(participant.games_played, 1);
    assert_eq!(participant.bonus_points, 10);

    // The second admin got the distinct "already handled" acknowledgement.
    let acks = bot.transport.acks();
    assert_eq!(acks.len(), 2);
    assert_eq!(acks[1].1, texts::already_resolved_ack());
}

#[tokio::test]
async fn a_resolved_request_frees_the_member_for_a_new_one() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    onboard(&bot, 100).await;

    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();
    let admin_message = &bot.transport.sent_to(1)[0];
    bot.dispatcher
        .handle_button(click(1, admin_message.message_id, 1, "reject_1"))
        .await
        .unwrap();

    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    let request = bot.store.get_visit_request(2).await.unwrap().unwrap();
    assert_matches!(request.status, RequestStatus::Pending);
}

#[tokio::test]
async fn fanout_continues_past_a_failing_administrator() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;
    seed_admin(&bot.store, 2).await;
    onboard(&bot, 100).await;
    bot.transport.fail_deliveries_to(1);

    bot.dispatcher
        .handle_text(text_from(100, texts::ADD_VISIT_LABEL))
        .await
        .unwrap();

    // The request exists despite the failed delivery, and the other admin
    // still got the controls.
    assert!(bot.store.get_visit_request(1).await.unwrap().is_some());
    assert!(bot.transport.sent_to(1).is_empty());
    assert_eq!(bot.transport.sent_to(2).len(), 1);
    assert_eq!(
        bot.transport.sent_to(2)[0].keyboard,
        Some(keyboards::approve_reject(1))
    );
}

#[tokio::test]
async fn malformed_button_payloads_are_ignored() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;

    bot.dispatcher
        .handle_button(click(1, 7, 1, "approve_"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_button(click(1, 7, 1, "nonsense"))
        .await
        .unwrap();

    assert!(bot.transport.acks().is_empty());
    assert!(bot.transport.edits().is_empty());
}

#[tokio::test]
async fn clicking_a_vanished_request_reports_a_failure_ack() {
    let bot = test_bot();
    seed_admin(&bot.store, 1).await;

    bot.dispatcher
        .handle_button(click(1, 7, 1, "approve_42"))
        .await
        .unwrap();

    let acks = bot.transport.acks();
    assert_eq!(acks.len(), 1);
    assert_eq!(acks[0].1, texts::resolve_failed_ack());
}

#[tokio::test]
async fn keyboard_spec_shapes_match_what_the_menus_advertise() {
    // The labels the dispatcher matches on are exactly the ones on the menu.
    let KeyboardSpec::Menu(rows) = keyboards::main_menu() else {
        panic!("expected reply menu");
    };
    let labels: Vec<String> = rows.into_iter().flatten().collect();
    assert_eq!(
        labels,
        vec![
            texts::ADD_VISIT_LABEL.to_string(),
            texts::MY_STATS_LABEL.to_string(),
            texts::BONUS_LABEL.to_string(),
        ]
    );
}
