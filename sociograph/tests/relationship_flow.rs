//! End-to-end walks of the relationship lifecycle through the public
//! API surface.

use std::sync::Arc;

use sociograph::prelude::*;

fn user(id: u64, profile_type: ProfileType) -> UserSummary {
    UserSummary {
        id: UserId(id),
        name: format!("User {id}"),
        username: format!("user{id}"),
        profile_type,
    }
}

async fn service_with(users: &[(u64, ProfileType)]) -> RelationshipService {
    let directory = Arc::new(InMemoryUserDirectory::new());
    for (id, profile_type) in users {
        directory.upsert(user(*id, *profile_type));
    }
    init_with_defaults(directory)
        .await
        .expect("service init should succeed")
}

#[tokio::test]
async fn public_target_follow_is_instant() {
    // User 1 is public; user 2 sends a follow.
    let service = service_with(&[(1, ProfileType::Public), (2, ProfileType::Private)]).await;

    let outcome = service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Followed);

    // Accepted immediately, no pending step, follower count moves.
    let edge = service
        .store()
        .find_edge(UserId(2), UserId(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edge.status, EdgeStatus::Accepted);
    assert_eq!(service.queries().follower_count(UserId(1)).await.unwrap(), 1);
    assert!(service
        .queries()
        .pending_incoming(UserId(1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn private_target_round_trip_through_accept() {
    // User 3 is private; user 4 requests, 3 accepts.
    let service = service_with(&[(3, ProfileType::Private), (4, ProfileType::Public)]).await;

    let outcome = service
        .engine()
        .execute(UserId(4), UserId(3), Verb::Send)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::RequestSent);

    let pending = service.queries().pending_incoming(UserId(3)).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user.id, UserId(4));

    let outcome = service
        .engine()
        .execute(UserId(3), UserId(4), Verb::Accept)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::RequestAccepted);

    let status = service
        .queries()
        .dual_status(UserId(4), UserId(3))
        .await
        .unwrap();
    assert_eq!(status.your_status, Some(EdgeStatus::Accepted));
    assert_eq!(status.their_status, None);

    let mirrored = service
        .queries()
        .dual_status(UserId(3), UserId(4))
        .await
        .unwrap();
    assert_eq!(mirrored.your_status, None);
    assert_eq!(mirrored.their_status, Some(EdgeStatus::Accepted));

    // The pending edge is gone, so a decline now has nothing to act on.
    let err = service
        .engine()
        .execute(UserId(3), UserId(4), Verb::Decline)
        .await
        .unwrap_err();
    assert!(matches!(err, RelationshipError::InvalidTransition { .. }));
}

#[tokio::test]
async fn sending_twice_never_duplicates_the_edge() {
    let service = service_with(&[(1, ProfileType::Public), (2, ProfileType::Public)]).await;

    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Send)
        .await
        .unwrap();
    let err = service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Send)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RelationshipError::InvalidTransition {
            verb: Verb::Send,
            ..
        }
    ));

    assert_eq!(service.queries().follower_count(UserId(2)).await.unwrap(), 1);
}

#[tokio::test]
async fn mutual_follows_are_independent_edges() {
    let service = service_with(&[(1, ProfileType::Public), (2, ProfileType::Public)]).await;

    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Send)
        .await
        .unwrap();
    service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();

    // Unfollowing one direction leaves the reverse accepted.
    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Unfollow)
        .await
        .unwrap();

    let status = service
        .queries()
        .dual_status(UserId(1), UserId(2))
        .await
        .unwrap();
    assert_eq!(status.your_status, None);
    assert_eq!(status.their_status, Some(EdgeStatus::Accepted));

    assert_eq!(service.queries().follower_count(UserId(1)).await.unwrap(), 1);
    assert_eq!(service.queries().follower_count(UserId(2)).await.unwrap(), 0);
}

#[tokio::test]
async fn visibility_flips_the_moment_the_edge_is_accepted() {
    let service = service_with(&[(1, ProfileType::Private), (2, ProfileType::Private)]).await;

    assert!(!service
        .visibility()
        .can_view(UserId(2), UserId(1))
        .await
        .unwrap());

    service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();
    assert!(!service
        .visibility()
        .can_view(UserId(2), UserId(1))
        .await
        .unwrap());

    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Accept)
        .await
        .unwrap();
    assert!(service
        .visibility()
        .can_view(UserId(2), UserId(1))
        .await
        .unwrap());

    // Approval ran one way only.
    assert!(!service
        .visibility()
        .can_view(UserId(1), UserId(2))
        .await
        .unwrap());
}

#[tokio::test]
async fn decline_then_resend_is_allowed() {
    let service = service_with(&[(1, ProfileType::Private), (2, ProfileType::Public)]).await;

    service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();
    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Decline)
        .await
        .unwrap();

    let status = service
        .queries()
        .dual_status(UserId(2), UserId(1))
        .await
        .unwrap();
    assert_eq!(status.your_status, None);

    // Declining removed the edge entirely, so the requester may try
    // again.
    let outcome = service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();
    assert_eq!(outcome, ActionOutcome::RequestSent);
}

#[tokio::test]
async fn concurrent_sends_settle_to_exactly_one_edge() {
    let service = Arc::new(
        service_with(&[(1, ProfileType::Private), (2, ProfileType::Public)]).await,
    );

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.engine().execute(UserId(2), UserId(1), Verb::Send).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(outcome) => {
                assert_eq!(outcome, ActionOutcome::RequestSent);
                successes += 1;
            }
            Err(RelationshipError::Conflict)
            | Err(RelationshipError::InvalidTransition {
                verb: Verb::Send, ..
            }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    let status = service
        .queries()
        .dual_status(UserId(2), UserId(1))
        .await
        .unwrap();
    assert_eq!(status.your_status, Some(EdgeStatus::Pending));
}

#[tokio::test]
async fn pending_lists_and_counts_track_the_full_lifecycle() {
    let service = service_with(&[
        (1, ProfileType::Private),
        (2, ProfileType::Public),
        (3, ProfileType::Public),
    ])
    .await;

    service
        .engine()
        .execute(UserId(2), UserId(1), Verb::Send)
        .await
        .unwrap();
    service
        .engine()
        .execute(UserId(3), UserId(1), Verb::Send)
        .await
        .unwrap();

    let incoming = service.queries().pending_incoming(UserId(1)).await.unwrap();
    assert_eq!(incoming.len(), 2);
    let outgoing = service.queries().pending_outgoing(UserId(2)).await.unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].user.id, UserId(1));

    service
        .engine()
        .execute(UserId(1), UserId(2), Verb::Accept)
        .await
        .unwrap();
    service
        .engine()
        .execute(UserId(1), UserId(3), Verb::Decline)
        .await
        .unwrap();

    assert!(service
        .queries()
        .pending_incoming(UserId(1))
        .await
        .unwrap()
        .is_empty());
    assert_eq!(service.queries().follower_count(UserId(1)).await.unwrap(), 1);

    let followers = service
        .queries()
        .followers(UserId(1), UserId(1))
        .await
        .unwrap();
    assert_eq!(followers.len(), 1);
    assert_eq!(followers[0].user.id, UserId(2));
}
