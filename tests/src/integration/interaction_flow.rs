//! # Interaction Flow
//!
//! Request validation, participant gathering and submission through a
//! recording transport, driven from the JSON shape callers build.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use moi_interactions::{
        validate_request, ExecuteResponse, InteractionAssembler, InteractionRequest,
        InteractionService, InteractionTransport, IxDefaults, IxError, IxParticipant, Operation,
        SimulateResponse, ValidationMode,
    };
    use moi_polo::{Depolorizer, PoloValue};
    use moi_types::hex::hex_to_bytes;
    use moi_types::{LockType, LogicId, ParticipantId};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const SENDER: &str = "0x28027ab68bd59c6cf54c83b32e02126859809436cd141b341d5fcb02bf7f6d64";
    const LOGIC: &str = "0x2000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000";
    const ASSET: &str = "0x00000000a9f5e8463babc197252de33a265eefc71c3497440c06faa233bda94125dbc668";

    // =========================================================================
    // FIXTURES
    // =========================================================================

    #[derive(Default, Clone)]
    struct RecordingTransport {
        submitted: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingTransport {
        fn submitted(&self) -> Vec<String> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InteractionTransport for RecordingTransport {
        async fn execute(&self, encoded: &str) -> Result<ExecuteResponse, IxError> {
            self.submitted
                .lock()
                .map_err(|e| IxError::Transport(e.to_string()))?
                .push(encoded.to_string());
            Ok(ExecuteResponse {
                hash: "0x01".into(),
            })
        }

        async fn simulate(&self, encoded: &str) -> Result<SimulateResponse, IxError> {
            self.submitted
                .lock()
                .map_err(|e| IxError::Transport(e.to_string()))?
                .push(encoded.to_string());
            Ok(SimulateResponse {
                effort: 120,
                result: json!({"status": 0}),
            })
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl InteractionTransport for FailingTransport {
        async fn execute(&self, _encoded: &str) -> Result<ExecuteResponse, IxError> {
            Err(IxError::Transport("connection refused".into()))
        }

        async fn simulate(&self, _encoded: &str) -> Result<SimulateResponse, IxError> {
            Err(IxError::Transport("connection refused".into()))
        }
    }

    fn mint_request() -> InteractionRequest {
        serde_json::from_value(json!({
            "sender": {"address": SENDER},
            "fuel_price": 1,
            "fuel_limit": 200,
            "operations": [
                {"type": 8, "payload": {"asset_id": ASSET, "amount": 100}}
            ]
        }))
        .unwrap()
    }

    fn invoke_request() -> InteractionRequest {
        serde_json::from_value(json!({
            "sender": {"address": SENDER},
            "fuel_price": 1,
            "fuel_limit": 200,
            "operations": [
                {"type": 13, "payload": {"logic_id": LOGIC, "callsite": "Transfer"}}
            ]
        }))
        .unwrap()
    }

    fn decode_submitted(encoded: &str) -> PoloValue {
        let bytes = hex_to_bytes(encoded).unwrap();
        Depolorizer::new(&bytes)
            .unwrap()
            .depolorize(InteractionAssembler::schema())
            .unwrap()
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    #[test]
    fn test_fuel_limit_required_only_for_execute() {
        let ix = InteractionRequest {
            fuel_limit: None,
            ..mint_request()
        };

        let issue = validate_request(ValidationMode::Execute, &ix).unwrap();
        assert_eq!(issue.field, "fuel_limit");
        assert_eq!(validate_request(ValidationMode::Simulate, &ix), None);
    }

    #[test]
    fn test_each_required_field_is_named() {
        let cases: Vec<(&str, InteractionRequest)> = vec![
            (
                "sender",
                InteractionRequest {
                    sender: None,
                    ..mint_request()
                },
            ),
            (
                "fuel_price",
                InteractionRequest {
                    fuel_price: None,
                    ..mint_request()
                },
            ),
            (
                "fuel_limit",
                InteractionRequest {
                    fuel_limit: None,
                    ..mint_request()
                },
            ),
            (
                "operations",
                InteractionRequest {
                    operations: vec![],
                    ..mint_request()
                },
            ),
        ];

        for (field, ix) in cases {
            let issue = validate_request(ValidationMode::Execute, &ix)
                .unwrap_or_else(|| panic!("{field} should be reported"));
            assert_eq!(issue.field, field);
        }
    }

    #[test]
    fn test_operation_fields_are_path_qualified() {
        let ix: InteractionRequest = serde_json::from_value(json!({
            "sender": {"address": SENDER},
            "fuel_price": 1,
            "fuel_limit": 200,
            "operations": [
                {"type": 8, "payload": {"asset_id": ASSET, "amount": 100}},
                {"type": 3, "payload": {"asset_id": ASSET, "amount": 1}}
            ]
        }))
        .unwrap();

        let issue = validate_request(ValidationMode::Execute, &ix).unwrap();
        assert_eq!(issue.field, "operations[1].beneficiary");
    }

    // =========================================================================
    // PARTICIPANTS
    // =========================================================================

    #[test]
    fn test_explicit_logic_participant_is_not_duplicated() {
        let logic_address = LogicId::from_hex(LOGIC).unwrap().address();
        let ix = InteractionRequest {
            participants: Some(vec![IxParticipant {
                id: logic_address.to_hex(),
                lock_type: LockType::ReadLock,
                notary: false,
            }]),
            ..invoke_request()
        };

        let participants = InteractionAssembler::gather_participants(&ix).unwrap();
        let entries: Vec<_> = participants
            .iter()
            .filter(|p| p.id == logic_address)
            .collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].lock_type, LockType::MutateLock);
    }

    #[test]
    fn test_participant_order() {
        let beneficiary = "0x94c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8757";
        let notary = "0x14c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8751";
        let ix: InteractionRequest = serde_json::from_value(json!({
            "sender": {"address": SENDER},
            "fuel_price": 1,
            "fuel_limit": 200,
            "operations": [
                {"type": 3, "payload": {"beneficiary": beneficiary, "asset_id": ASSET, "amount": 5}}
            ],
            "participants": [{"id": notary, "lock_type": 1, "notary": true}]
        }))
        .unwrap();

        let ids: Vec<ParticipantId> = InteractionAssembler::gather_participants(&ix)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                ParticipantId::from_hex(SENDER).unwrap(),
                ParticipantId::from_hex(beneficiary).unwrap(),
                ParticipantId::from_hex(notary).unwrap(),
            ]
        );
    }

    #[test]
    fn test_gathering_is_idempotent() {
        let first = InteractionAssembler::gather_participants(&invoke_request()).unwrap();
        let ix = InteractionRequest {
            participants: Some(first.iter().copied().map(IxParticipant::from).collect()),
            ..invoke_request()
        };
        assert_eq!(InteractionAssembler::gather_participants(&ix).unwrap(), first);
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    #[tokio::test]
    async fn test_execute_hands_encoded_interaction_to_transport() {
        moi_telemetry::init_test_logging();
        let transport = RecordingTransport::default();
        let service = InteractionService::new(transport.clone(), IxDefaults::default()).unwrap();

        let response = service.execute(mint_request()).await.unwrap();
        assert_eq!(response.hash, "0x01");

        let submitted = transport.submitted();
        assert_eq!(submitted.len(), 1);
        let expected = InteractionAssembler::encode(&mint_request()).unwrap();
        assert_eq!(hex_to_bytes(&submitted[0]).unwrap(), expected);

        let value = decode_submitted(&submitted[0]);
        assert_eq!(value.field("fuel_limit"), Some(&PoloValue::from(200u64)));
        assert_eq!(service.stats().await.executed, 1);
    }

    #[tokio::test]
    async fn test_simulate_without_fuel_limit() {
        let transport = RecordingTransport::default();
        let service = InteractionService::new(transport.clone(), IxDefaults::default()).unwrap();
        let ix = InteractionRequest {
            fuel_limit: None,
            ..invoke_request()
        };

        let response = service.simulate(ix).await.unwrap();
        assert_eq!(response.effort, 120);

        let stats = service.stats().await;
        assert_eq!(stats.simulated, 1);
        assert_eq!(stats.rejected, 0);
        assert_eq!(transport.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_rejections_are_counted() {
        let transport = RecordingTransport::default();
        let service = InteractionService::new(transport.clone(), IxDefaults::default()).unwrap();

        let mut ix = mint_request();
        ix.operations = vec![serde_json::from_value::<Operation>(json!({
            "type": 8, "payload": {"asset_id": "0x1234", "amount": 1}
        }))
        .unwrap()];

        match service.execute(ix).await {
            Err(IxError::InvalidRequest(issue)) => {
                assert_eq!(issue.field, "operations[0].asset_id")
            }
            other => panic!("expected invalid request, got {other:?}"),
        }
        assert_eq!(service.stats().await.rejected, 1);
        assert!(transport.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let service = InteractionService::new(FailingTransport, IxDefaults::default()).unwrap();
        let err = service.execute(mint_request()).await.unwrap_err();
        assert!(matches!(err, IxError::Transport(_)));
        assert_eq!(service.stats().await.executed, 0);
    }
}
