//! # Operation Vectors
//!
//! Payload encodings for every registered operation kind, checked byte for
//! byte against encodings accepted by the node. Operations enter through
//! the JSON boundary (`{"type", "payload"}`) the way client code builds
//! them.

#[cfg(test)]
mod tests {
    use moi_interactions::{IxError, Operation, OperationCodec, OperationRegistry, RawOperation};
    use moi_types::OpKind;
    use serde_json::{json, Value};

    const MANIFEST: &str = "0x080000fc61d49266591e2c6fa27f60973e085586d26acab0c7f0d354bf9c61afe7b782";
    const LOGIC_ID: &str = "0x2000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000";
    const ASSET_68: &str = "0x00000000a9f5e8463babc197252de33a265eefc71c3497440c06faa233bda94125dbc668";
    const ASSET_61: &str = "0x00000000a9f5e8463babc197252de33a265eefc71c3497440c06faa233bda94125dbc661";
    const HOLDER: &str = "0x94c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8757";

    struct Vector {
        name: &'static str,
        operation: Value,
        expected: &'static str,
    }

    fn vectors() -> Vec<Vector> {
        vec![
            Vector {
                name: "asset create",
                operation: json!({"type": 5, "payload": {
                    "symbol": "MOI", "supply": 500, "standard": 0,
                    "is_logical": false, "dimension": 0, "is_stateful": false
                }}),
                expected: "0e7f063353535151504d4f4901f4",
            },
            Vector {
                name: "participant create",
                operation: json!({"type": 1, "payload": {
                    "address": "0x28027ab68bd59c6cf54c83b32e02126859809436cd141b341d5fcb02bf7f6d64",
                    "amount": 100,
                    "keys_payload": []
                }}),
                expected: "0e5f068e04930428027ab68bd59c6cf54c83b32e02126859809436cd141b341d5fcb02bf7f6d640f64",
            },
            Vector {
                name: "asset mint",
                operation: json!({"type": 8, "payload": {"asset_id": ASSET_68, "amount": 100}}),
                expected: "0e3f06a309307830303030303030306139663565383436336261626331393732353264653333613236356565666337316333343937343430633036666161323333626461393431323564626336363864",
            },
            Vector {
                name: "asset burn",
                operation: json!({"type": 9, "payload": {"asset_id": ASSET_61, "amount": 100}}),
                expected: "0e3f06a309307830303030303030306139663565383436336261626331393732353264653333613236356565666337316333343937343430633036666161323333626461393431323564626336363164",
            },
            Vector {
                name: "asset transfer",
                operation: json!({"type": 3, "payload": {
                    "beneficiary": "0x86d8826ac7dc4ffb73fae39dedf72958a405b878f25ed362f2f496c60a4604f4",
                    "asset_id": "0x000000004cd973c4eb83cdb8870c0de209736270491b7acc99873da1eddced5826c3b548",
                    "amount": 100
                }}),
                expected: "0e9f010686048608a311b311000000000000000000000000000000000000000000000000000000000000000086d8826ac7dc4ffb73fae39dedf72958a405b878f25ed362f2f496c60a4604f4307830303030303030303463643937336334656238336364623838373063306465323039373336323730343931623761636339393837336461316564646365643538323663336235343864",
            },
            Vector {
                name: "logic deploy with calldata and interfaces",
                operation: json!({"type": 12, "payload": {
                    "manifest": MANIFEST,
                    "callsite": "AnyCallsite",
                    "calldata": MANIFEST,
                    "interfaces": {"hello": MANIFEST}
                }}),
                expected: "0e9f0106b004b604e6059e0a080000fc61d49266591e2c6fa27f60973e085586d26acab0c7f0d354bf9c61afe7b782416e7943616c6c73697465080000fc61d49266591e2c6fa27f60973e085586d26acab0c7f0d354bf9c61afe7b7822f065668656c6c6f307830383030303066633631643439323636353931653263366661323766363039373365303835353836643236616361623063376630643335346266396336316166653762373832",
            },
            Vector {
                name: "logic deploy with interfaces",
                operation: json!({"type": 12, "payload": {
                    "manifest": MANIFEST,
                    "callsite": "AnyCallsite",
                    "interfaces": {"hello": MANIFEST}
                }}),
                expected: "0e9f0106b004b604e005ee05080000fc61d49266591e2c6fa27f60973e085586d26acab0c7f0d354bf9c61afe7b782416e7943616c6c736974652f065668656c6c6f307830383030303066633631643439323636353931653263366661323766363039373365303835353836643236616361623063376630643335346266396336316166653762373832",
            },
            Vector {
                name: "logic deploy",
                operation: json!({"type": 12, "payload": {"manifest": MANIFEST, "callsite": "AnyCallsite"}}),
                expected: "0e9f0106b004b604e005e005080000fc61d49266591e2c6fa27f60973e085586d26acab0c7f0d354bf9c61afe7b782416e7943616c6c73697465",
            },
            Vector {
                name: "logic enlist",
                operation: json!({"type": 14, "payload": {"logic_id": LOGIC_ID, "callsite": "AnyCallsite"}}),
                expected: "0e8f0100068604b005b0052000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000416e7943616c6c73697465",
            },
            Vector {
                name: "logic invoke",
                operation: json!({"type": 13, "payload": {
                    "logic_id": LOGIC_ID,
                    "callsite": "AnyCallsite",
                    "calldata": "0x0d6f0665b6019502737570706c790305f5e10073796d626f6c064d4f49"
                }}),
                expected: "0e8f0100068604b60580092000000002b41f96f85d57cbee6f6f57ab0d65352dd1d03ad156aa2e00000000416e7943616c6c736974650d6f0665b6019502737570706c790305f5e10073796d626f6c064d4f49",
            },
            Vector {
                name: "asset approve",
                operation: json!({"type": 6, "payload": {
                    "beneficiary": HOLDER,
                    "asset_id": ASSET_68,
                    "amount": 100,
                    "timestamp": 86_400_000u64
                }}),
                expected: "0e9f010686048608a311b311000000000000000000000000000000000000000000000000000000000000000094c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c875730783030303030303030613966356538343633626162633139373235326465333361323635656566633731633334393734343063303666616132333362646139343132356462633636386405265c00",
            },
            Vector {
                name: "asset release",
                operation: json!({"type": 11, "payload": {
                    "benefactor": HOLDER,
                    "beneficiary": HOLDER,
                    "amount": 100,
                    "asset_id": ASSET_68
                }}),
                expected: "0e9f010686048608a311b31194c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c875794c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8757307830303030303030306139663565383436336261626331393732353264653333613236356565666337316333343937343430633036666161323333626461393431323564626336363864",
            },
            Vector {
                name: "asset lockup",
                operation: json!({"type": 10, "payload": {
                    "amount": 100,
                    "asset_id": ASSET_61,
                    "beneficiary": "0x94c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8751"
                }}),
                expected: "0e9f010686048608a311b311000000000000000000000000000000000000000000000000000000000000000094c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8751307830303030303030306139663565383436336261626331393732353264653333613236356565666337316333343937343430633036666161323333626461393431323564626336363164",
            },
            Vector {
                name: "asset revoke",
                operation: json!({"type": 7, "payload": {
                    "asset_id": "0x00000000a9f5e8463babc297252de33a265eeac71c3497440c06faa233bda94125dbc661",
                    "beneficiary": "0x14c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c8751"
                }}),
                expected: "0e9f010686048608a311a311000000000000000000000000000000000000000000000000000000000000000014c1e6005ba03c48130c9c32c1fd7d1a0364413253eb5cf1c56164f93a6c87513078303030303030303061396635653834363362616263323937323532646533336132363565656163373163333439373434306330366661613233336264613934313235646263363631",
            },
            Vector {
                name: "account configure",
                operation: json!({"type": 2, "payload": {"add": [{"weight": 1}]}}),
                expected: "0e2f0e701f0e3f00031301",
            },
        ]
    }

    #[test]
    fn test_operation_vectors() {
        for vector in vectors() {
            let kind = vector.operation["type"].as_u64().unwrap();
            let operation: Operation = serde_json::from_value(vector.operation).unwrap();
            let encoded = OperationCodec::encode(&operation)
                .unwrap_or_else(|e| panic!("{}: {e}", vector.name));

            assert_eq!(u64::from(encoded.kind.code()), kind, "{}", vector.name);
            assert_eq!(encoded.payload_hex(), vector.expected, "{}", vector.name);
        }
    }

    #[test]
    fn test_vectors_cover_every_registered_kind() {
        let covered: Vec<u64> = vectors()
            .iter()
            .map(|v| v.operation["type"].as_u64().unwrap())
            .collect();
        for descriptor in OperationRegistry::global().list() {
            assert!(
                covered.contains(&u64::from(descriptor.kind().code())),
                "{} has no vector",
                descriptor.kind()
            );
        }
    }

    #[test]
    fn test_encoded_payloads_decode_with_their_schema() {
        for vector in vectors() {
            let operation: Operation = serde_json::from_value(vector.operation).unwrap();
            let encoded = OperationCodec::encode(&operation).unwrap();
            assert!(
                OperationCodec::decode(&encoded).is_ok(),
                "{} should decode",
                vector.name
            );
        }
    }

    #[test]
    fn test_json_boundary_round_trip() {
        let value = json!({"type": 8, "payload": {"asset_id": ASSET_68, "amount": 100}});
        let operation: Operation = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(operation.kind(), OpKind::AssetMint);
        assert_eq!(serde_json::to_value(&operation).unwrap(), value);
    }

    #[test]
    fn test_unregistered_kind_rejected_at_json_boundary() {
        let value = json!({"type": 15, "payload": {}});
        assert!(serde_json::from_value::<Operation>(value).is_err());

        let raw = RawOperation {
            kind: OpKind::LogicInteract,
            payload: json!({}),
        };
        assert_eq!(
            OperationCodec::encode_raw(raw),
            Err(IxError::UnregisteredOperationKind(OpKind::LogicInteract))
        );
    }

    #[test]
    fn test_registry_lists_thirteen_kinds() {
        let registry = OperationRegistry::global();
        assert_eq!(registry.list().len(), 13);
        for kind in [OpKind::Invalid, OpKind::FuelSupply, OpKind::LogicInteract, OpKind::LogicUpgrade] {
            assert!(!registry.is_registered(kind));
        }
    }

    #[test]
    fn test_amount_above_u64_encodes() {
        let value = json!({"type": 8, "payload": {
            "asset_id": ASSET_68,
            "amount": 340_282_366_920_938_463_463_374_607_431_768_211_455u128
        }});
        let operation: Operation = serde_json::from_value(value).unwrap();
        let encoded = OperationCodec::encode(&operation).unwrap();
        // 16 bytes of 0xff close the payload
        assert!(encoded.payload_hex().ends_with(&"ff".repeat(16)));
    }
}
