//! CyberPower 私有 MIB（`.1.3.6.1.4.1.3808`）。

use crate::RegisterSpec;
use domain::{Transform, WireType};

pub(crate) const REGISTERS: &[RegisterSpec] = &[
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.1.1.0",
        name: "ups_battery_status",
        help: "UPS battery status (1=unknown, 2=normal, 3=low, 4=not present)",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.2.5.0",
        name: "ups_battery_replace_indicator",
        help: "UPS battery replace indicator (1=no replacement needed, 2=replace battery)",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.3.2.5.0",
        name: "ups_input_line_fail_cause",
        help: "Reason for the most recent transfer to battery",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.3.2.6.0",
        name: "ups_input_status",
        help: "UPS utility input status",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.4.1.1.0",
        name: "ups_output_status",
        help: "UPS output status",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.2.1.0",
        name: "ups_battery_capacity",
        help: "Remaining battery capacity in percent",
        expected: WireType::Gauge,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.4.2.4.0",
        name: "ups_output_current",
        help: "UPS output current in amperes",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.2.2.0",
        name: "ups_battery_voltage",
        help: "Battery voltage in volts DC",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.3.2.1.0",
        name: "ups_input_line_voltage",
        help: "Utility input line voltage in volts",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.4.2.1.0",
        name: "ups_output_voltage",
        help: "UPS output voltage in volts",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.4.2.3.0",
        name: "ups_output_load",
        help: "UPS output load in percent of rated capacity",
        expected: WireType::Gauge,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.2.3.0",
        name: "ups_battery_temperature",
        help: "Battery temperature in degrees Celsius",
        expected: WireType::Gauge,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.4.2.1.0",
        name: "ups_environment_sensor_temperature",
        help: "Environment sensor temperature in degrees Celsius",
        expected: WireType::Integer,
        transform: Transform::FahrenheitTenthsToCelsius,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.2.2.4.0",
        name: "ups_battery_runtime",
        help: "Estimated battery runtime remaining in minutes",
        expected: WireType::TimeTicks,
        transform: Transform::CentisecondsToMinutes,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.3.2.4.0",
        name: "ups_input_frequency",
        help: "Utility input frequency in hertz",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.1.4.2.2.0",
        name: "ups_output_frequency",
        help: "UPS output frequency in hertz",
        expected: WireType::Gauge,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.4.1.3808.1.1.4.3.1.0",
        name: "ups_environment_sensor_humidity",
        help: "Environment sensor relative humidity in percent",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
];
