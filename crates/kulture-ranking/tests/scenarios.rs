//! End-to-end scenarios over small take batches.

use kulture_ranking::{
    build_leaderboard, rank_of, verify_take, worst_takes, Author, Community, CommunityDirectory,
    CommunityRecord, Take, VoteType,
};

fn take(id: &str, author: &str, community: Community) -> Take {
    Take::new(id, Author::new(author), community)
}

#[test]
fn half_of_ten_members_verifies() {
    let verified = take("t", "alice", Community::new("c", 10)).with_upvotes(5);
    assert_eq!(verify_take(&verified).unwrap().verified_count, 1);

    let short = take("t", "alice", Community::new("c", 10)).with_upvotes(4);
    assert_eq!(verify_take(&short).unwrap().verified_count, 0);
}

#[test]
fn small_child_verifies_large_parent_does_not() {
    let chain = Community::new("a", 2).with_parent(Community::new("b", 100));
    let result = verify_take(&take("t", "alice", chain).with_upvotes(1)).unwrap();
    assert_eq!(result.verified_count, 1);
}

#[test]
fn more_points_rank_higher() {
    let two_levels = || Community::new("a", 2).with_parent(Community::new("b", 2));
    let one_level = || Community::new("a", 2).with_parent(Community::new("b", 100));

    let takes = [
        take("alice-1", "alice", two_levels()).with_upvotes(1),
        take("bob-1", "bob", two_levels()).with_upvotes(1),
        take("bob-2", "bob", one_level()).with_upvotes(1),
    ];

    let board = build_leaderboard(&takes).unwrap();
    assert_eq!(board.get("bob").unwrap().points, 3);
    assert_eq!(board.get("alice").unwrap().points, 2);
    assert_eq!(rank_of("bob", &takes).unwrap(), Some(1));
    assert_eq!(rank_of("alice", &takes).unwrap(), Some(2));
}

#[test]
fn worst_takes_sorted_by_downvotes() {
    let x = take("x", "alice", Community::new("c", 10)).with_downvotes(5);
    let y = take("y", "bob", Community::new("c", 10))
        .with_upvotes(10)
        .with_downvotes(3);

    let report = worst_takes(&[y, x]).unwrap();
    assert_eq!(report[0].take.id, "x");
    assert_eq!(report[0].score, -5);
    assert_eq!(report[1].take.id, "y");
    assert_eq!(report[1].score, 7);
}

#[test]
fn unvoted_take_contributes_nothing() {
    let chain = Community::new("a", 1).with_parent(Community::new("b", 1));
    let silent = take("t", "carol", chain);
    assert_eq!(verify_take(&silent).unwrap().verified_count, 0);
    assert!(build_leaderboard(&[silent]).unwrap().is_empty());
}

#[test]
fn live_vote_toggling_moves_rank() {
    let mut alice = take("a", "alice", Community::new("c", 2));
    let bob = take("b", "bob", Community::new("c", 2)).with_upvotes(1);

    alice.toggle_vote("voter", VoteType::Up);
    assert_eq!(rank_of("alice", &[alice.clone(), bob.clone()]).unwrap(), Some(1));

    alice.toggle_vote("voter", VoteType::Up);
    assert_eq!(rank_of("alice", &[alice, bob]).unwrap(), None);
}

#[test]
fn directory_backed_batch() {
    let directory: CommunityDirectory = [
        CommunityRecord::new("music", 20),
        CommunityRecord::new("jazz", 6).with_parent_id("music"),
        CommunityRecord::new("bebop", 2).with_parent_id("jazz"),
    ]
    .into_iter()
    .collect();

    let takes = [
        take("t1", "miles", directory.nest("bebop").unwrap()).with_upvotes(3),
        take("t2", "bird", directory.nest("jazz").unwrap()).with_upvotes(10),
    ];

    let board = build_leaderboard(&takes).unwrap();
    // t1: bebop ✓ (1), jazz ✓ (3), music ✗ (10)
    assert_eq!(board.get("miles").unwrap().points, 2);
    // t2: jazz ✓, music ✓
    assert_eq!(board.get("bird").unwrap().points, 2);
    // Tie on points and verified takes, id decides
    assert_eq!(board.rank_of("bird"), Some(1));
    assert_eq!(board.rank_of("miles"), Some(2));
}

#[test]
fn json_batch_round_trip() {
    let json = r#"[
        {
            "id": "t1",
            "authorId": "u1",
            "author": { "id": "u1", "name": "Una", "username": "una", "image": "https://img/u1" },
            "votes": [ { "type": "UP", "userId": "u2" }, { "type": "UP", "userId": "u3" } ],
            "community": { "id": "c1", "memberCount": 3, "parent": { "id": "c0", "memberCount": 4, "parent": null } }
        }
    ]"#;
    let takes: Vec<Take> = serde_json::from_str(json).unwrap();
    let board = build_leaderboard(&takes).unwrap();
    let out = serde_json::to_value(&board).unwrap();

    assert_eq!(out[0]["id"], "u1");
    assert_eq!(out[0]["name"], "Una");
    assert_eq!(out[0]["image"], "https://img/u1");
    assert_eq!(out[0]["points"], 2);
    assert_eq!(out[0]["multiVerifiedTakesCount"], 1);
    assert_eq!(out[0]["totalVerifications"], 2);
}
