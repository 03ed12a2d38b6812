//! Conversions between qbind values and mysql_async values

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use mysql_async::Value as MySqlValue;

use crate::error::{Error, Result};
use crate::value::Value;

/// Convert a bound parameter into the wire value sent to the server.
///
/// Fails for dates whose year does not fit the wire format (0 to 65535).
pub fn to_mysql_value(value: &Value) -> Result<MySqlValue> {
    Ok(match value {
        Value::Null => MySqlValue::NULL,
        Value::Bool(v) => MySqlValue::from(*v),
        Value::I8(v) => MySqlValue::from(*v),
        Value::I16(v) => MySqlValue::from(*v),
        Value::I32(v) => MySqlValue::from(*v),
        Value::I64(v) => MySqlValue::from(*v),
        Value::U8(v) => MySqlValue::from(*v),
        Value::U16(v) => MySqlValue::from(*v),
        Value::U32(v) => MySqlValue::from(*v),
        Value::U64(v) => MySqlValue::from(*v),
        Value::F32(v) => MySqlValue::from(*v),
        Value::F64(v) => MySqlValue::from(*v),
        Value::String(v) => MySqlValue::from(v.as_str()),
        Value::Bytes(v) => MySqlValue::from(v.as_slice()),
        Value::Date(d) => date_value(d, &NaiveTime::MIN)?,
        Value::DateTime(dt) => date_value(&dt.date(), &dt.time())?,
        Value::Time(t) => MySqlValue::Time(
            false,
            0,
            t.hour() as u8,
            t.minute() as u8,
            t.second() as u8,
            t.nanosecond() / 1_000,
        ),
        // Sent as text so the server parses them with full precision.
        Value::Decimal(v) => MySqlValue::from(v.to_string()),
        Value::Json(v) => MySqlValue::from(v.to_string()),
    })
}

fn date_value(date: &NaiveDate, time: &NaiveTime) -> Result<MySqlValue> {
    let year = u16::try_from(date.year()).map_err(|_| Error::TypeConversion {
        expected: "date with year 0..=65535",
        actual: date.to_string(),
    })?;
    Ok(MySqlValue::Date(
        year,
        date.month() as u8,
        date.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
        time.nanosecond() / 1_000,
    ))
}

/// Convert a fetched column value.
///
/// Text columns arrive as bytes and are returned as strings when they are
/// valid UTF-8. A DATETIME at exactly midnight is indistinguishable from a
/// DATE on the wire and comes back as `Value::Date`.
pub fn from_mysql_value(value: MySqlValue) -> Result<Value> {
    match value {
        MySqlValue::NULL => Ok(Value::Null),
        MySqlValue::Bytes(v) => Ok(match String::from_utf8(v) {
            Ok(s) => Value::String(s),
            Err(e) => Value::Bytes(e.into_bytes()),
        }),
        MySqlValue::Int(v) => Ok(Value::I64(v)),
        MySqlValue::UInt(v) => Ok(Value::U64(v)),
        MySqlValue::Float(v) => Ok(Value::F32(v)),
        MySqlValue::Double(v) => Ok(Value::F64(v)),
        MySqlValue::Date(year, month, day, hour, min, sec, micro) => {
            let date = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
                .ok_or_else(|| Error::TypeConversion {
                    expected: "date",
                    actual: format!("{}-{}-{}", year, month, day),
                })?;
            if (hour, min, sec, micro) == (0, 0, 0, 0) {
                return Ok(Value::Date(date));
            }
            let time = clock_time(hour, min, sec, micro)?;
            Ok(Value::DateTime(NaiveDateTime::new(date, time)))
        }
        MySqlValue::Time(negative, days, hours, mins, secs, micro) => {
            // TIME columns can hold intervals; only a time of day maps to NaiveTime.
            if negative || days > 0 || hours >= 24 {
                let sign = if negative { "-" } else { "" };
                return Err(Error::TypeConversion {
                    expected: "time (00:00:00 to 23:59:59)",
                    actual: format!(
                        "{}{}:{:02}:{:02}",
                        sign,
                        days * 24 + u32::from(hours),
                        mins,
                        secs
                    ),
                });
            }
            Ok(Value::Time(clock_time(hours, mins, secs, micro)?))
        }
    }
}

fn clock_time(hour: u8, min: u8, sec: u8, micro: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_micro_opt(hour.into(), min.into(), sec.into(), micro).ok_or_else(|| {
        Error::TypeConversion {
            expected: "time",
            actual: format!("{}:{}:{}.{}", hour, min, sec, micro),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_round_trip_through_wire_value() {
        let dt = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_micro_opt(7, 8, 9, 10)
            .unwrap();
        let wire = to_mysql_value(&Value::DateTime(dt)).unwrap();
        assert_eq!(wire, MySqlValue::Date(2024, 5, 6, 7, 8, 9, 10));
        assert_eq!(from_mysql_value(wire).unwrap(), Value::DateTime(dt));
    }

    #[test]
    fn test_midnight_reads_back_as_date() {
        let wire = MySqlValue::Date(2024, 1, 31, 0, 0, 0, 0);
        assert_eq!(
            from_mysql_value(wire).unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
    }

    #[test]
    fn test_text_and_binary_bytes() {
        assert_eq!(
            from_mysql_value(MySqlValue::Bytes(b"abc".to_vec())).unwrap(),
            Value::from("abc")
        );
        assert_eq!(
            from_mysql_value(MySqlValue::Bytes(vec![0xff, 0x00])).unwrap(),
            Value::Bytes(vec![0xff, 0x00])
        );
    }

    #[test]
    fn test_interval_time_is_rejected() {
        let wire = MySqlValue::Time(true, 0, 1, 0, 0, 0);
        assert!(from_mysql_value(wire).is_err());
    }

    #[test]
    fn test_negative_year_is_rejected() {
        let bc = NaiveDate::from_ymd_opt(-44, 3, 15).unwrap();
        assert!(matches!(
            to_mysql_value(&Value::Date(bc)),
            Err(Error::TypeConversion { .. })
        ));
        assert!(to_mysql_value(&Value::DateTime(bc.and_hms_opt(12, 0, 0).unwrap())).is_err());
    }
}
