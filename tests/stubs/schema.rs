#![allow(dead_code)]
// Each integration test binary uses a different subset of these

/// POWER declares its own usage and TOGGLE; LIGHT inherits both
pub const POWER_TOGGLE: &str = r#"
{
    "type_bits": 13,
    "bit_count": 3,
    "types": [
        {
            "name": "POWER",
            "flags": "CMD | TOGGLE",
            "label": "Power",
            "usage": "POWER_STATE",
            "children": {
                "bit_count": 3,
                "types": [
                    {"name": "LIGHT", "flags": "CMD", "label": "Light"},
                    {"name": "FAN", "flags": "CMD", "label": "Fan", "usage": "FAN_STATE"}
                ]
            }
        },
        {
            "name": "SENSOR",
            "flags": "",
            "label": "Sensor",
            "usage": "READING",
            "children": {
                "bit_count": 2,
                "types": [
                    {"name": "TEMPERATURE", "flags": "", "label": "Temperature"}
                ]
            }
        }
    ]
}
"#;

/// Two bits address at most three types
pub const OVERFLOW: &str = r#"
{
    "type_bits": 13,
    "bit_count": 2,
    "types": [
        {"name": "A", "label": "A"},
        {"name": "B", "label": "B"},
        {"name": "C", "label": "C"},
        {"name": "D", "label": "D"}
    ]
}
"#;

/// The nested level asks for more bits than are left
pub const INSUFFICIENT_BITS: &str = r#"
{
    "type_bits": 4,
    "bit_count": 3,
    "types": [
        {
            "name": "A",
            "label": "A",
            "children": {
                "bit_count": 2,
                "types": [{"name": "B", "label": "B"}]
            }
        }
    ]
}
"#;

pub const MALFORMED: &str = r#"{"type_bits": 13, "bit_count": 2, "types": [{"name": "A"}]}"#;

/// `A.B_C` and `A_B.C` both enumerate as `A_B_C`
pub const COLLIDING: &str = r#"
{
    "type_bits": 13,
    "bit_count": 3,
    "types": [
        {
            "name": "A",
            "label": "A",
            "children": {"bit_count": 2, "types": [{"name": "B_C", "label": "B C"}]}
        },
        {
            "name": "A_B",
            "label": "A B",
            "children": {"bit_count": 2, "types": [{"name": "C", "label": "C"}]}
        }
    ]
}
"#;
