//! Per-request handling.
//!
//! The dispatcher owns the `AuctionEngine`; nothing else can touch
//! auction state, so requests are applied strictly one at a time in
//! the order the coordinator hands them out.
//!
//! Every failure inside a request (undecodable payload, unknown action,
//! rule violation, failed report) is logged and turned into `reject`.

use tracing::{error, info, warn};

use auction_core::{AuctionEngine, InspectQuery, Outcome, Status};
use auction_protocol::command_codec::{decode_advance, decode_inspect};
use auction_protocol::encode_json;
use auction_protocol::rollup::{AdvanceRequest, InspectRequest, RollupRequest};

use crate::coordinator::Coordinator;

#[derive(Debug)]
pub struct Dispatcher {
    engine: AuctionEngine,
}

impl Dispatcher {
    pub fn new(engine: AuctionEngine) -> Self {
        Dispatcher { engine }
    }

    pub fn engine(&self) -> &AuctionEngine {
        &self.engine
    }

    /// Process one coordinator request to a terminal status.
    pub async fn handle<C>(&mut self, request: RollupRequest, coordinator: &mut C) -> Status
    where
        C: Coordinator + ?Sized,
    {
        match request {
            RollupRequest::AdvanceState(advance) => self.handle_advance(&advance),
            RollupRequest::InspectState(inspect) => self.handle_inspect(&inspect, coordinator).await,
        }
    }

    pub fn handle_advance(&mut self, request: &AdvanceRequest) -> Status {
        let input_index = request.metadata.as_ref().map(|m| m.input_index);

        let command = match decode_advance(&request.payload) {
            Ok(command) => command,
            Err(e) => {
                let reason = if e.is_malformed_payload() {
                    "unreadable payload"
                } else {
                    "invalid command"
                };
                warn!(?input_index, error = %e, reason, "rejecting advance request");
                return Status::Reject;
            }
        };

        match self.engine.process(command) {
            Ok(outcome) => {
                log_outcome(input_index, &outcome);
                Status::Accept
            }
            Err(e) => {
                warn!(?input_index, error = %e, "rejecting advance request");
                Status::Reject
            }
        }
    }

    pub async fn handle_inspect<C>(&mut self, request: &InspectRequest, coordinator: &mut C) -> Status
    where
        C: Coordinator + ?Sized,
    {
        let query = match decode_inspect(&request.payload) {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, "rejecting inspect request: bad payload");
                return Status::Reject;
            }
        };

        match query {
            InspectQuery::CheckState => {
                let snapshot = self.engine.snapshot();
                let payload = match encode_json(&snapshot) {
                    Ok(payload) => payload,
                    Err(e) => {
                        error!(error = %e, "failed to encode snapshot");
                        return Status::Reject;
                    }
                };

                match coordinator.report(payload).await {
                    Ok(()) => {
                        info!(
                            highest_bid = snapshot.highest_bid,
                            accounts = snapshot.accounts.len(),
                            "reported auction state"
                        );
                        Status::Accept
                    }
                    Err(e) => {
                        error!(error = %e, "failed to report auction state");
                        Status::Reject
                    }
                }
            }
        }
    }
}

fn log_outcome(input_index: Option<u64>, outcome: &Outcome) {
    match outcome {
        Outcome::AccountCreated { name, balance } => {
            info!(?input_index, %name, balance, "account created");
        }
        Outcome::BidPlaced {
            bidder,
            value,
            refunded,
        } => match refunded {
            Some(refund) => info!(
                ?input_index,
                %bidder,
                value,
                outbid = %refund.bidder,
                refunded = refund.amount,
                "bid placed"
            ),
            None => info!(?input_index, %bidder, value, "bid placed"),
        },
        Outcome::AuctionSettled {
            winner,
            amount,
            beneficiary,
            next_threshold,
        } => info!(
            ?input_index,
            %winner,
            amount,
            %beneficiary,
            next_threshold,
            "auction settled"
        ),
    }
}
