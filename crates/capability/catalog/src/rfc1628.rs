//! 标准 UPS-MIB（RFC 1628，`.1.3.6.1.2.1.33`）。
//!
//! 输入/输出表只读取第一相（行索引 1）。

use crate::RegisterSpec;
use domain::{Transform, WireType};

pub(crate) const REGISTERS: &[RegisterSpec] = &[
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.1.0",
        name: "ups_battery_status",
        help: "UPS battery status (1=unknown, 2=normal, 3=low, 4=depleted)",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.2.0",
        name: "ups_battery_seconds_on_battery",
        help: "Seconds elapsed since the UPS switched to battery power, 0 when on utility",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.3.0",
        name: "ups_battery_runtime",
        help: "Estimated battery runtime remaining in minutes",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.4.0",
        name: "ups_battery_capacity",
        help: "Remaining battery capacity in percent",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.5.0",
        name: "ups_battery_voltage",
        help: "Battery voltage in volts DC",
        expected: WireType::Integer,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.2.7.0",
        name: "ups_battery_temperature",
        help: "Battery temperature in degrees Celsius",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.3.3.1.2.1",
        name: "ups_input_frequency",
        help: "Utility input frequency in hertz",
        expected: WireType::Integer,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.3.3.1.3.1",
        name: "ups_input_line_voltage",
        help: "Utility input line voltage in volts",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.4.1.0",
        name: "ups_output_source",
        help: "Present source of output power (3=normal, 4=bypass, 5=battery)",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.4.2.0",
        name: "ups_output_frequency",
        help: "UPS output frequency in hertz",
        expected: WireType::Integer,
        transform: Transform::Tenths,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.4.4.1.2.1",
        name: "ups_output_voltage",
        help: "UPS output voltage in volts",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.4.4.1.5.1",
        name: "ups_output_load",
        help: "UPS output load in percent of rated capacity",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.6.1.0",
        name: "ups_alarms_present",
        help: "Number of active alarm conditions",
        expected: WireType::Gauge,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.9.3.0",
        name: "ups_config_output_voltage",
        help: "Nominal output voltage in volts",
        expected: WireType::Integer,
        transform: Transform::Identity,
    },
    RegisterSpec {
        oid: ".1.3.6.1.2.1.33.1.9.4.0",
        name: "ups_config_output_frequency",
        help: "Nominal output frequency in hertz",
        expected: WireType::Integer,
        transform: Transform::Tenths,
    },
];
