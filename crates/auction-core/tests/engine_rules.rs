use auction_core::{
    Account, AdvanceCommand, AuctionConfig, AuctionEngine, AuctionError, FixedThreshold, Outcome, Refund,
    SendBid, ThresholdSource,
};

const BENEFICIARY: &str = "house";

/// Hands out a fixed list of thresholds and counts draws.
struct Scripted {
    values: Vec<u64>,
    draws: usize,
}

impl ThresholdSource for Scripted {
    fn draw(&mut self) -> u64 {
        let value = self.values[self.draws % self.values.len()];
        self.draws += 1;
        value
    }
}

fn config(threshold: u64) -> AuctionConfig {
    AuctionConfig {
        beneficiary: BENEFICIARY.to_string(),
        initial_threshold: threshold,
        auction_duration_secs: 60,
    }
}

fn engine_with(accounts: &[(&str, u64)]) -> AuctionEngine {
    let mut engine = AuctionEngine::new(config(100), FixedThreshold(100));
    for (name, balance) in accounts {
        engine.create_account(*name, *balance).unwrap();
    }
    engine
}

#[test]
fn starts_with_only_the_beneficiary() {
    let engine = AuctionEngine::new(config(100), FixedThreshold(100));

    assert_eq!(engine.num_accounts(), 1);
    assert_eq!(engine.account(BENEFICIARY).unwrap().balance, 0);
    assert_eq!(engine.highest_bid(), 0);
    assert_eq!(engine.highest_bidder(), None);
    assert_eq!(engine.minimum_bid(), 100);
}

#[test]
fn create_account_reports_outcome() {
    let mut engine = engine_with(&[]);
    let outcome = engine.create_account("alice", 0).unwrap();

    assert_eq!(
        outcome,
        Outcome::AccountCreated {
            name: "alice".to_string(),
            balance: 0
        }
    );
    assert_eq!(engine.account("alice").unwrap().balance, 0);
}

#[test]
fn beneficiary_cannot_be_recreated() {
    let mut engine = engine_with(&[]);
    assert_eq!(
        engine.create_account(BENEFICIARY, 10),
        Err(AuctionError::DuplicateAccount(BENEFICIARY.to_string()))
    );
}

#[test]
fn every_failed_precondition_leaves_state_untouched() {
    let mut engine = engine_with(&[("alice", 500), ("bob", 110)]);
    engine.place_bid("alice", 200).unwrap();
    let before = engine.snapshot();

    let cases = [
        ("nobody", 300, AuctionError::UnknownAccount("nobody".to_string())),
        (
            "bob",
            100,
            AuctionError::BidBelowThreshold {
                value: 100,
                threshold: 100,
            },
        ),
        (
            "bob",
            200,
            AuctionError::BidNotAboveCurrent {
                value: 200,
                current: 200,
            },
        ),
        (
            "bob",
            201,
            AuctionError::InsufficientBalance {
                name: "bob".to_string(),
                balance: 110,
                value: 201,
            },
        ),
    ];

    for (name, value, expected) in cases {
        assert_eq!(engine.place_bid(name, value), Err(expected));
        assert_eq!(engine.snapshot(), before);
    }
}

#[test]
fn insufficient_balance_rejects_even_without_a_standing_bid() {
    let mut engine = engine_with(&[("bob", 50)]);
    let before = engine.snapshot();

    assert!(matches!(
        engine.place_bid("bob", 120),
        Err(AuctionError::InsufficientBalance { .. })
    ));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn outbidding_refunds_the_previous_bidder() {
    let mut engine = engine_with(&[("alice", 300), ("bob", 300)]);

    engine.place_bid("alice", 150).unwrap();
    let outcome = engine.place_bid("bob", 151).unwrap();

    assert_eq!(
        outcome,
        Outcome::BidPlaced {
            bidder: "bob".to_string(),
            value: 151,
            refunded: Some(Refund {
                bidder: "alice".to_string(),
                amount: 150,
            }),
        }
    );
    assert_eq!(engine.account("alice").unwrap().balance, 300);
    assert_eq!(engine.account("bob").unwrap().balance, 149);
    assert_eq!(engine.highest_bid(), 151);
    assert_eq!(engine.highest_bidder(), Some("bob"));
}

#[test]
fn raising_your_own_bid_only_debits_the_difference() {
    let mut engine = engine_with(&[("alice", 200)]);

    engine.place_bid("alice", 150).unwrap();
    let outcome = engine.place_bid("alice", 200).unwrap();

    assert_eq!(
        outcome,
        Outcome::BidPlaced {
            bidder: "alice".to_string(),
            value: 200,
            refunded: None,
        }
    );
    assert_eq!(engine.account("alice").unwrap().balance, 0);
    assert_eq!(engine.highest_bid(), 200);

    // Escrow plus balance is all alice has.
    assert!(matches!(
        engine.place_bid("alice", 201),
        Err(AuctionError::InsufficientBalance { balance: 200, .. })
    ));
}

#[test]
fn settlement_without_a_bid_rejects_and_keeps_threshold() {
    let mut engine = AuctionEngine::new(
        config(100),
        Scripted {
            values: vec![7],
            draws: 0,
        },
    );
    let before = engine.snapshot();

    assert_eq!(engine.settle_auction(), Err(AuctionError::NoBidToSettle));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.minimum_bid(), 100);
}

#[test]
fn settlement_pays_beneficiary_and_redraws_threshold_every_round() {
    let mut engine = AuctionEngine::new(
        config(100),
        Scripted {
            values: vec![40, 250],
            draws: 0,
        },
    );
    engine.create_account("alice", 1_000).unwrap();

    engine.place_bid("alice", 101).unwrap();
    let outcome = engine.process(AdvanceCommand::EndAuction).unwrap();
    assert_eq!(
        outcome,
        Outcome::AuctionSettled {
            winner: "alice".to_string(),
            amount: 101,
            beneficiary: BENEFICIARY.to_string(),
            next_threshold: 40,
        }
    );
    assert_eq!(engine.minimum_bid(), 40);
    assert_eq!(engine.highest_bid(), 0);
    assert_eq!(engine.highest_bidder(), None);

    // The next round starts from zero: a low bid above the new threshold wins.
    engine.place_bid("alice", 41).unwrap();
    engine.settle_auction().unwrap();
    assert_eq!(engine.minimum_bid(), 250);

    assert_eq!(engine.account(BENEFICIARY).unwrap().balance, 142);
    assert_eq!(engine.account("alice").unwrap().balance, 858);
}

#[test]
fn second_settlement_in_a_row_rejects() {
    let mut engine = engine_with(&[("alice", 1_000)]);
    engine.place_bid("alice", 500).unwrap();
    engine.settle_auction().unwrap();

    assert_eq!(engine.settle_auction(), Err(AuctionError::NoBidToSettle));
}

#[test]
fn beneficiary_can_bid_with_proceeds() {
    let mut engine = engine_with(&[("alice", 1_000)]);
    engine.place_bid("alice", 500).unwrap();
    engine.settle_auction().unwrap();

    engine.place_bid(BENEFICIARY, 300).unwrap();
    assert_eq!(engine.account(BENEFICIARY).unwrap().balance, 200);
    engine.settle_auction().unwrap();
    assert_eq!(engine.account(BENEFICIARY).unwrap().balance, 500);
}

#[test]
fn settlement_that_would_overflow_the_beneficiary_rejects() {
    let mut engine = engine_with(&[("whale", u64::MAX), ("bob", 500)]);
    engine.place_bid("whale", u64::MAX).unwrap();
    engine.settle_auction().unwrap();
    assert_eq!(engine.account(BENEFICIARY).unwrap().balance, u64::MAX);

    engine.place_bid("bob", 200).unwrap();
    let before = engine.snapshot();

    assert_eq!(
        engine.settle_auction(),
        Err(AuctionError::BalanceOverflow(BENEFICIARY.to_string()))
    );
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.highest_bidder(), Some("bob"));
}

#[test]
fn process_routes_send_bid() {
    let mut engine = engine_with(&[("alice", 1_000)]);
    let outcome = engine
        .process(AdvanceCommand::SendBid(SendBid {
            name: "alice".to_string(),
            value: 900,
        }))
        .unwrap();

    assert!(matches!(outcome, Outcome::BidPlaced { value: 900, .. }));
    assert_eq!(engine.account("alice").unwrap().balance, 100);
}

#[test]
fn snapshot_serializes_in_camel_case_with_sorted_accounts() {
    let mut engine = engine_with(&[("zed", 10), ("amy", 300)]);
    engine.place_bid("amy", 150).unwrap();

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "beneficiary": BENEFICIARY,
            "minimumBid": 100,
            "highestBid": 150,
            "highestBidder": "amy",
            "auctionDuration": 60,
            "accounts": {
                "amy": { "balance": 150 },
                "house": { "balance": 0 },
                "zed": { "balance": 10 }
            }
        })
    );

    let text = serde_json::to_string(&engine.snapshot()).unwrap();
    let accounts = &text[text.find("\"accounts\"").unwrap()..];
    let amy = accounts.find("\"amy\"").unwrap();
    let zed = accounts.find("\"zed\"").unwrap();
    assert!(amy < zed);
}

#[test]
fn empty_snapshot_has_null_bidder() {
    let engine = engine_with(&[]);
    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["highestBidder"], serde_json::Value::Null);
    assert_eq!(json["highestBid"], 0);
}

#[test]
fn account_arithmetic_is_checked() {
    let account = Account::new(100);

    assert_eq!(account.credited(50), Some(150));
    assert_eq!(account.debited(100), Some(0));
    assert_eq!(account.debited(101), None);
    assert_eq!(Account::new(u64::MAX).credited(1), None);
}
