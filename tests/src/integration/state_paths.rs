//! # State Paths
//!
//! Manifest-driven path resolution, storage-key derivation and slot reads
//! against an in-memory node fixture.

#[cfg(test)]
mod tests {
    use moi_crypto::{sum256, sum256_many};
    use moi_polo::{polorize, PoloSchema, PoloValue};
    use moi_state::{
        derive, Accessor, ElementDescriptor, EphemeralState, InMemoryStorage, PersistentState,
        Primitive, StateError, StateMode, StorageKey, TypeExpr,
    };
    use moi_types::{LogicId, ParticipantId};
    use primitive_types::U256;
    use proptest::prelude::*;
    use std::sync::Arc;

    const LOGIC: &str = "0x2000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000";

    const MANIFEST: &str = r#"{
        "syntax": 1,
        "engine": {"kind": "PISA", "flags": []},
        "elements": [
            {
                "ptr": 0,
                "kind": "state",
                "data": {
                    "mode": "persistent",
                    "fields": [
                        {"slot": 0, "label": "Name", "type": "string"},
                        {"slot": 1, "label": "Balances", "type": "map[address]u256"},
                        {"slot": 2, "label": "Operators", "type": "[]address"},
                        {"slot": 3, "label": "Vaults", "type": "map[string]class.Vault"}
                    ]
                }
            },
            {
                "ptr": 1,
                "kind": "state",
                "data": {
                    "mode": "ephemeral",
                    "fields": [
                        {"slot": 0, "label": "Allowance", "type": "map[address]u64"}
                    ]
                }
            },
            {
                "ptr": 2,
                "kind": "class",
                "data": {
                    "name": "Vault",
                    "fields": [
                        {"slot": 0, "label": "owner", "type": "address"},
                        {"slot": 1, "label": "locked", "type": "u64"}
                    ],
                    "methods": []
                }
            }
        ]
    }"#;

    // =========================================================================
    // FIXTURES
    // =========================================================================

    fn logic_id() -> LogicId {
        LogicId::from_hex(LOGIC).unwrap()
    }

    fn descriptor() -> Arc<ElementDescriptor> {
        Arc::new(ElementDescriptor::from_json(MANIFEST).unwrap())
    }

    fn integer(value: u64) -> Vec<u8> {
        polorize(&PoloValue::from(value), &PoloSchema::Integer).unwrap()
    }

    fn holder() -> ParticipantId {
        ParticipantId::from_hex(
            "0x94c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8757",
        )
        .unwrap()
    }

    // =========================================================================
    // DERIVATION
    // =========================================================================

    #[test]
    fn test_balances_path_resolves_to_single_property_step() {
        let state =
            PersistentState::new(logic_id(), descriptor(), Arc::new(InMemoryStorage::new()))
                .unwrap();

        let path = state
            .resolve(|s| s.entity("Balances")?.property(holder()))
            .unwrap();

        assert_eq!(path.base_slot, 1);
        assert_eq!(path.accessors.len(), 1);
        assert!(matches!(path.accessors[0], Accessor::Property(_)));
        assert_eq!(path.storage_type, TypeExpr::Primitive(Primitive::U256));
    }

    #[test]
    fn test_property_key_layout() {
        let base = StorageKey::from_u64(1);
        // address keys encode as a word: 0x06 || bytes
        let mut encoded = vec![0x06];
        encoded.extend_from_slice(holder().as_bytes());

        let current = base.to_bytes();
        let hashed = sum256(&encoded);
        let expected = sum256_many(&[&current[..], &b"."[..], &hashed[..]]);
        assert_eq!(
            derive(base, &[Accessor::property(holder())]),
            StorageKey::from_hash(expected)
        );
    }

    #[test]
    fn test_array_and_field_offsets() {
        let base = StorageKey::from_u64(2);
        let start = U256::from_big_endian(&sum256(&base.to_bytes()));

        assert_eq!(
            derive(base, &[Accessor::ArrayIndex(3)]).as_u256(),
            start + U256::from(3u64)
        );
        assert_eq!(
            derive(base, &[Accessor::ClassField(1)]).as_u256(),
            start + U256::from(1u64)
        );
    }

    #[test]
    fn test_offsets_use_wrapping_addition() {
        let accessors = [Accessor::ArrayIndex(u64::MAX)];
        for slot in 0..64u64 {
            let base = StorageKey::from_u64(slot);
            let start = U256::from_big_endian(&sum256(&base.to_bytes()));
            let (expected, _) = start.overflowing_add(U256::from(u64::MAX));
            assert_eq!(derive(base, &accessors).as_u256(), expected);
        }
    }

    #[test]
    fn test_oversized_key_rejected() {
        let mut bytes = vec![0x01];
        bytes.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            StorageKey::from_bytes(&bytes),
            Err(StateError::StorageKeyOverflow { bits: 257 })
        );

        let mut padded = vec![0u8; 4];
        padded.extend_from_slice(&[0xff; 32]);
        assert_eq!(
            StorageKey::from_bytes(&padded).unwrap().as_u256(),
            U256::MAX
        );
    }

    #[test]
    fn test_nested_class_path() {
        let state =
            PersistentState::new(logic_id(), descriptor(), Arc::new(InMemoryStorage::new()))
                .unwrap();

        let path = state
            .resolve(|s| s.entity("Vaults")?.property("primary")?.field("locked"))
            .unwrap();

        assert_eq!(path.base_slot, 3);
        assert_eq!(
            path.accessors,
            vec![Accessor::property("primary"), Accessor::ClassField(1)]
        );
        assert_eq!(path.storage_type, TypeExpr::Primitive(Primitive::U64));
    }

    // =========================================================================
    // READS
    // =========================================================================

    #[tokio::test]
    async fn test_balance_round_trip_through_storage() {
        moi_telemetry::init_test_logging();
        let storage = Arc::new(InMemoryStorage::new());
        let state = PersistentState::new(logic_id(), descriptor(), storage.clone()).unwrap();

        let key = state
            .resolve(|s| s.entity("Balances")?.property(holder()))
            .unwrap()
            .storage_key();
        storage
            .insert(&logic_id(), key, None, integer(1_500))
            .unwrap();

        let balance = state
            .get(|s| s.entity("Balances")?.property(holder()))
            .await
            .unwrap();
        assert_eq!(balance, PoloValue::from(1_500u64));
    }

    #[tokio::test]
    async fn test_length_reads_container_slot() {
        let storage = Arc::new(InMemoryStorage::new());
        let state = PersistentState::new(logic_id(), descriptor(), storage.clone()).unwrap();

        storage
            .insert(&logic_id(), StorageKey::from_u64(2), None, integer(3))
            .unwrap();

        let length = state.get(|s| s.entity("Operators")?.length()).await.unwrap();
        assert_eq!(length, PoloValue::from(3u64));
    }

    #[tokio::test]
    async fn test_ephemeral_allowance_is_scoped_to_participant() {
        let storage = Arc::new(InMemoryStorage::new());
        let state = EphemeralState::new(logic_id(), descriptor(), storage.clone()).unwrap();
        let spender = ParticipantId::new([0x33; 32]);

        let key = state
            .resolve(|s| s.entity("Allowance")?.property(spender))
            .unwrap()
            .storage_key();
        storage
            .insert(&logic_id(), key, Some(holder()), integer(25))
            .unwrap();

        let own = state
            .get(&holder(), |s| s.entity("Allowance")?.property(spender))
            .await
            .unwrap();
        let other = state
            .get(&spender, |s| s.entity("Allowance")?.property(spender))
            .await
            .unwrap();

        assert_eq!(own, PoloValue::from(25u64));
        assert_eq!(other, PoloValue::from(0u64));
    }

    #[tokio::test]
    async fn test_persistent_path_unknown_in_ephemeral_state() {
        let state = EphemeralState::new(
            logic_id(),
            descriptor(),
            Arc::new(InMemoryStorage::new()),
        )
        .unwrap();

        let err = state
            .get(&holder(), |s| s.entity("Balances"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            StateError::UnknownStateField {
                label: "Balances".into(),
                mode: StateMode::Ephemeral,
            }
        );
    }

    // =========================================================================
    // PROPERTIES
    // =========================================================================

    proptest! {
        #[test]
        fn prop_resolution_is_deterministic(owner in any::<[u8; 32]>()) {
            let descriptor = descriptor();
            let state = PersistentState::new(
                logic_id(),
                descriptor,
                Arc::new(InMemoryStorage::new()),
            )
            .unwrap();

            let participant = ParticipantId::new(owner);
            let first = state
                .resolve(|s| s.entity("Balances")?.property(participant))
                .unwrap();
            let second = state
                .resolve(|s| s.entity("Balances")?.property(participant))
                .unwrap();

            prop_assert_eq!(first.storage_key(), second.storage_key());
            prop_assert_eq!(
                first.storage_key(),
                Accessor::property(participant).access(StorageKey::from_u64(1))
            );
        }

        #[test]
        fn prop_distinct_owners_get_distinct_slots(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            prop_assume!(a != b);
            let base = StorageKey::from_u64(1);
            prop_assert_ne!(
                derive(base, &[Accessor::property(ParticipantId::new(a))]),
                derive(base, &[Accessor::property(ParticipantId::new(b))])
            );
        }
    }
}
