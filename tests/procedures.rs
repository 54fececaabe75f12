use plugc::codes::AllocateError;
use plugc::compile::{self, Artifacts, Rule};
use plugc::render::Format;
use plugc::schema;
use plugc::Code;

mod stubs;

fn reference() -> Artifacts {
    compile::load_and_compile(None).unwrap()
}

fn code(artifacts: &Artifacts, name: &str) -> Code {
    artifacts
        .lookup(name)
        .unwrap_or_else(|| panic!("no constant {name}"))
}

fn compatible(artifacts: &Artifacts, dst: &str, src: &str) -> bool {
    artifacts.is_compatible(code(artifacts, dst), code(artifacts, src))
}

#[test]
fn switch_equivalence() {
    let artifacts = reference();
    assert!(compatible(&artifacts, "BINARY_SWITCH_IN", "TERNARY_SWITCH_OUT"));
    assert!(compatible(&artifacts, "TERNARY_OPENING_GATE_IN", "BINARY_BUTTON_WALL_OUT"));
}

#[test]
fn command_cannot_drive_measured_value() {
    let artifacts = reference();
    let verdict = artifacts.check_compatibility(
        code(&artifacts, "PHYSICAL_TEMPERATURE_MEASURED_IN"),
        code(&artifacts, "BINARY_POWER_LIGHT_CMD_OUT"),
    );
    assert!(!verdict.compatible);
    assert_eq!(verdict.rule, Rule::CommandAsymmetry);
}

#[test]
fn value_drives_switch() {
    let artifacts = reference();
    assert!(compatible(
        &artifacts,
        "BINARY_SWITCH_IN",
        "PHYSICAL_TEMPERATURE_MEASURED_OUT"
    ));
    assert!(compatible(
        &artifacts,
        "BINARY_SWITCH_IN",
        "PHYSICAL_TEMPERATURE_SETPOINT_OUT"
    ));
    assert!(!compatible(
        &artifacts,
        "BINARY_SWITCH_IN",
        "PHYSICAL_TEMPERATURE_SETPOINT_CMD_OUT"
    ));
}

#[test]
fn same_code_still_needs_directions() {
    let artifacts = reference();
    let light = artifacts.lookup("BINARY_POWER_LIGHT").unwrap();
    assert!(!artifacts.is_compatible(light, light));
    assert!(!compatible(&artifacts, "BINARY_POWER_LIGHT_OUT", "BINARY_POWER_LIGHT_IN"));
    assert!(compatible(&artifacts, "BINARY_POWER_LIGHT_IN", "BINARY_POWER_LIGHT_OUT"));
}

#[test]
fn generalization_only_towards_destination() {
    let artifacts = reference();
    assert!(compatible(&artifacts, "METERING_IN", "METERING_ELECTRIC_SUPPLY_PEAK_OUT"));
    assert!(!compatible(&artifacts, "METERING_ELECTRIC_SUPPLY_PEAK_IN", "METERING_OUT"));
    assert!(compatible(
        &artifacts,
        "PHYSICAL_TEMPERATURE_MEASURED_ROOM_IN",
        "PHYSICAL_TEMPERATURE_MEASURED_OUTDOOR_OUT"
    ));
    assert!(!compatible(
        &artifacts,
        "PHYSICAL_TEMPERATURE_SETPOINT_IN",
        "PHYSICAL_TEMPERATURE_MEASURED_ROOM_OUT"
    ));
}

#[test]
fn float_commands() {
    let artifacts = reference();
    assert!(compatible(&artifacts, "LIGHTING_BRIGHTNESS_CMD_IN", "LIGHTING_BRIGHTNESS_OUT"));
    assert!(!compatible(&artifacts, "LIGHTING_BRIGHTNESS_IN", "LIGHTING_BRIGHTNESS_CMD_OUT"));
    assert!(compatible(&artifacts, "LIGHTING_BRIGHTNESS_CMD_IN", "ENCODER_WHEEL_OUT"));
}

#[test]
fn label_round_trip_returns_leaf_label() {
    let artifacts = reference();
    let light = code(&artifacts, "BINARY_POWER_LIGHT_CMD_OUT");
    assert!(light.is_command() && light.is_output());
    assert_eq!(artifacts.label(light), Some("Light Power"));
    assert_eq!(
        artifacts.label(code(&artifacts, "BINARY_POWER")),
        Some("Power State")
    );
}

#[test]
fn usage_inherits_tag_and_toggle() {
    let schema = schema::from_str(stubs::schema::POWER_TOGGLE).unwrap();
    let artifacts = compile::compile(&schema).unwrap();

    let light = code(&artifacts, "POWER_LIGHT");
    assert_eq!(artifacts.usage(light, true), "POWER_STATE_TOGGLE");
    assert_eq!(artifacts.usage(light, false), "POWER_STATE");

    let fan = code(&artifacts, "POWER_FAN");
    assert_eq!(artifacts.usage(fan, true), "FAN_STATE");
    assert_eq!(
        artifacts.usage(code(&artifacts, "SENSOR_TEMPERATURE"), true),
        "READING"
    );

    let usages: Vec<_> = artifacts.usages.iter().map(String::as_str).collect();
    assert_eq!(
        usages,
        ["FAN_STATE", "NONE", "POWER_STATE", "POWER_STATE_TOGGLE", "READING"]
    );
}

#[test]
fn schema_errors_abort_compilation() {
    let overflow = schema::from_str(stubs::schema::OVERFLOW).unwrap();
    assert!(matches!(
        compile::compile(&overflow),
        Err(AllocateError::CategoryOverflow { count: 4, .. })
    ));

    let insufficient = schema::from_str(stubs::schema::INSUFFICIENT_BITS).unwrap();
    assert!(matches!(
        compile::compile(&insufficient),
        Err(AllocateError::InsufficientBits { path, .. }) if path == "A"
    ));

    assert!(schema::from_str(stubs::schema::MALFORMED).is_err());

    let colliding = schema::from_str(stubs::schema::COLLIDING).unwrap();
    assert!(matches!(
        compile::compile(&colliding),
        Err(AllocateError::DuplicateConstant { name, .. }) if name == "A_B_C"
    ));
}

#[test]
fn recompiling_yields_identical_artifacts() {
    for format in [Format::Cpp, Format::Json] {
        let first = format.renderer().render(&reference()).unwrap();
        let second = format.renderer().render(&reference()).unwrap();
        assert_eq!(first, second, "{format}");
    }
}
