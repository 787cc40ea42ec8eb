use serde_json::json;

use auction_core::Status;
use auction_protocol::rollup::{
    AdvanceRequest, FinishRequest, InspectRequest, Metadata, ReportRequest, RollupRequest,
};

#[test]
fn finish_body_uses_lowercase_status() {
    assert_eq!(
        serde_json::to_value(FinishRequest { status: Status::Accept }).unwrap(),
        json!({"status": "accept"})
    );
    assert_eq!(
        serde_json::to_value(FinishRequest { status: Status::Reject }).unwrap(),
        json!({"status": "reject"})
    );
}

#[test]
fn parses_an_advance_request_with_metadata() {
    let body = json!({
        "request_type": "advance_state",
        "data": {
            "metadata": {
                "msg_sender": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
                "epoch_index": 0,
                "input_index": 3,
                "block_number": 17,
                "timestamp": 1700000000
            },
            "payload": "0x7b7d"
        }
    });

    let request: RollupRequest = serde_json::from_value(body).unwrap();
    assert_eq!(request.kind(), "advance_state");
    assert_eq!(request.payload(), "0x7b7d");

    match request {
        RollupRequest::AdvanceState(AdvanceRequest { metadata, .. }) => {
            let metadata = metadata.unwrap();
            assert_eq!(metadata.input_index, 3);
            assert_eq!(metadata.block_number, 17);
        }
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn tolerates_partial_or_missing_metadata() {
    let bare: RollupRequest = serde_json::from_value(json!({
        "request_type": "advance_state",
        "data": { "payload": "0x" }
    }))
    .unwrap();
    assert_eq!(
        bare,
        RollupRequest::AdvanceState(AdvanceRequest {
            metadata: None,
            payload: "0x".to_string()
        })
    );

    let partial: RollupRequest = serde_json::from_value(json!({
        "request_type": "advance_state",
        "data": { "metadata": { "input_index": 9, "chain_id": 31337 }, "payload": "0x" }
    }))
    .unwrap();
    assert_eq!(
        partial,
        RollupRequest::AdvanceState(AdvanceRequest {
            metadata: Some(Metadata {
                input_index: 9,
                ..Metadata::default()
            }),
            payload: "0x".to_string()
        })
    );
}

#[test]
fn parses_an_inspect_request() {
    let request: RollupRequest = serde_json::from_value(json!({
        "request_type": "inspect_state",
        "data": { "payload": "0x7b7d" }
    }))
    .unwrap();

    assert_eq!(
        request,
        RollupRequest::InspectState(InspectRequest {
            payload: "0x7b7d".to_string()
        })
    );
}

#[test]
fn unknown_request_types_fail_to_parse() {
    let result = serde_json::from_value::<RollupRequest>(json!({
        "request_type": "something_else",
        "data": { "payload": "0x" }
    }));
    assert!(result.is_err());
}

#[test]
fn report_body_carries_the_payload() {
    let report = ReportRequest {
        payload: "0xdeadbeef".to_string(),
    };
    assert_eq!(serde_json::to_value(report).unwrap(), json!({"payload": "0xdeadbeef"}));
}
