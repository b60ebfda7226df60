//! Users query and dynamic row serialization
//!
//! The `users` schema is owned by the database, so rows are not mapped to a
//! struct. Each column is decoded by its reported MySQL type and rendered in
//! the shape existing API clients expect: dates as ISO-8601 UTC strings,
//! DECIMAL as exact text, binary columns as `{"type":"Buffer","data":[..]}`.
//! A value stored in a valid column never fails the request: TIME keeps its
//! full `-838:59:59..838:59:59` range and zero dates render as `null`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Map, Number, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, MySqlPool, Row, TypeInfo, ValueRef};

/// Hard cap on returned rows
pub const USERS_LIMIT: usize = 100;

pub const USERS_QUERY: &str = "SELECT * FROM users LIMIT 100";

/// One `users` row: column name to JSON value, in column order
pub type UserRow = Map<String, Value>;

/// Fetch up to 100 rows from `users`, unmodified.
pub async fn fetch_users(pool: &MySqlPool) -> Result<Vec<UserRow>, sqlx::Error> {
    let rows = sqlx::query(USERS_QUERY).fetch_all(pool).await?;
    tracing::debug!(count = rows.len(), "Fetched users");

    rows.iter().map(row_to_json).collect()
}

/// JSON rendering family of a MySQL column type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Signed,
    Unsigned,
    Float,
    Decimal,
    Date,
    DateTime,
    Time,
    Json,
    Binary,
    Text,
}

impl ColumnKind {
    /// Classify a type name as reported by `TypeInfo::name`.
    pub fn from_type_name(name: &str) -> Self {
        if name.ends_with("UNSIGNED") {
            return Self::Unsigned;
        }

        match name {
            "BOOLEAN" | "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" | "YEAR" => {
                Self::Signed
            }
            "FLOAT" | "DOUBLE" => Self::Float,
            "DECIMAL" => Self::Decimal,
            "DATE" => Self::Date,
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "TIME" => Self::Time,
            "JSON" => Self::Json,
            "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BIT"
            | "GEOMETRY" => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Convert a row into a JSON object keyed by column name.
pub fn row_to_json(row: &MySqlRow) -> Result<UserRow, sqlx::Error> {
    let mut object = Map::with_capacity(row.len());

    for column in row.columns() {
        let index = column.ordinal();
        let value = if row.try_get_raw(index)?.is_null() {
            Value::Null
        } else {
            let kind = ColumnKind::from_type_name(column.type_info().name());
            decode_column(row, index, kind)?
        };
        object.insert(column.name().to_owned(), value);
    }

    Ok(object)
}

fn decode_column(row: &MySqlRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    // kind comes from the column's own type, so the compatibility check is redundant
    let value = match kind {
        ColumnKind::Signed => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        ColumnKind::Unsigned => Value::from(row.try_get_unchecked::<u64, _>(index)?),
        ColumnKind::Float => float_value(row.try_get_unchecked::<f64, _>(index)?),
        // `0000-00-00` and friends have no calendar form
        ColumnKind::Date => match row.try_get_unchecked::<NaiveDate, _>(index) {
            Ok(date) => Value::String(iso_timestamp(date.and_time(NaiveTime::MIN))),
            Err(e) => invalid_date(index, e),
        },
        ColumnKind::DateTime => match row.try_get_unchecked::<NaiveDateTime, _>(index) {
            Ok(value) => Value::String(iso_timestamp(value)),
            Err(e) => invalid_date(index, e),
        },
        ColumnKind::Time => {
            let raw = row.try_get_unchecked::<&[u8], _>(index)?;
            match format_time(raw) {
                Some(text) => Value::String(text),
                None => {
                    return Err(sqlx::Error::Decode(
                        format!("malformed TIME value in column {index}").into(),
                    ))
                }
            }
        }
        ColumnKind::Json => row.try_get_unchecked::<Value, _>(index)?,
        ColumnKind::Binary => buffer_value(&row.try_get_unchecked::<Vec<u8>, _>(index)?),
        ColumnKind::Decimal | ColumnKind::Text => {
            Value::String(row.try_get_unchecked::<String, _>(index)?)
        }
    };

    Ok(value)
}

fn invalid_date(index: usize, error: sqlx::Error) -> Value {
    tracing::debug!("Column {} holds an invalid date, rendering null: {}", index, error);
    Value::Null
}

/// Render a TIME cell as `[-]H:MM:SS[.ffffff]`, hours unbounded.
///
/// Accepts both wire encodings: the binary protocol's length-prefixed
/// `sign, days, hours, minutes, seconds[, micros]` layout and plain text.
fn format_time(raw: &[u8]) -> Option<String> {
    let Some((&len, body)) = raw.split_first() else {
        return None;
    };

    // Text values start with a digit or '-', never with a length byte
    if !matches!(len, 0 | 8 | 12) || usize::from(len) != body.len() {
        return std::str::from_utf8(raw).ok().map(str::to_owned);
    }
    if len == 0 {
        return Some("00:00:00".to_owned());
    }

    let negative = body[0] == 1;
    let days = u32::from_le_bytes(body[1..5].try_into().ok()?);
    let hours = days * 24 + u32::from(body[5]);
    let (minutes, seconds) = (body[6], body[7]);

    let mut text = format!(
        "{}{:02}:{:02}:{:02}",
        if negative { "-" } else { "" },
        hours,
        minutes,
        seconds
    );
    if len == 12 {
        let micros = u32::from_le_bytes(body[8..12].try_into().ok()?);
        if micros > 0 {
            text.push_str(&format!(".{:06}", micros));
        }
    }
    Some(text)
}

/// Non-finite floats have no JSON form and become `null`.
fn float_value(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// `2024-01-02T03:04:05.000Z`; stored values are treated as UTC
fn iso_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn buffer_value(bytes: &[u8]) -> Value {
    json!({ "type": "Buffer", "data": bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_types_are_numbers() {
        for name in ["TINYINT", "SMALLINT", "MEDIUMINT", "INT", "BIGINT", "BOOLEAN", "YEAR"] {
            assert_eq!(ColumnKind::from_type_name(name), ColumnKind::Signed, "{name}");
        }
        assert_eq!(
            ColumnKind::from_type_name("BIGINT UNSIGNED"),
            ColumnKind::Unsigned
        );
        assert_eq!(
            ColumnKind::from_type_name("TINYINT UNSIGNED"),
            ColumnKind::Unsigned
        );
    }

    #[test]
    fn temporal_and_special_types() {
        assert_eq!(ColumnKind::from_type_name("DATE"), ColumnKind::Date);
        assert_eq!(ColumnKind::from_type_name("DATETIME"), ColumnKind::DateTime);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMP"), ColumnKind::DateTime);
        assert_eq!(ColumnKind::from_type_name("TIME"), ColumnKind::Time);
        assert_eq!(ColumnKind::from_type_name("DECIMAL"), ColumnKind::Decimal);
        assert_eq!(ColumnKind::from_type_name("JSON"), ColumnKind::Json);
        assert_eq!(ColumnKind::from_type_name("DOUBLE"), ColumnKind::Float);
    }

    #[test]
    fn binary_and_text_types() {
        for name in ["BLOB", "LONGBLOB", "VARBINARY", "BINARY", "BIT"] {
            assert_eq!(ColumnKind::from_type_name(name), ColumnKind::Binary, "{name}");
        }
        for name in ["VARCHAR", "CHAR", "TEXT", "ENUM", "SET", "SOMETHING_NEW"] {
            assert_eq!(ColumnKind::from_type_name(name), ColumnKind::Text, "{name}");
        }
    }

    #[test]
    fn timestamps_render_with_millis_and_zulu() {
        let value = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_milli_opt(3, 4, 5, 60)
            .unwrap();
        assert_eq!(iso_timestamp(value), "2024-01-02T03:04:05.060Z");

        let midnight = NaiveDate::from_ymd_opt(1999, 12, 31)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(iso_timestamp(midnight), "1999-12-31T00:00:00.000Z");
    }

    #[test]
    fn buffers_render_as_typed_byte_objects() {
        assert_eq!(
            buffer_value(&[0xde, 0xad]),
            json!({ "type": "Buffer", "data": [222, 173] })
        );
    }

    #[test]
    fn non_finite_floats_are_null() {
        assert_eq!(float_value(f64::NAN), Value::Null);
        assert_eq!(float_value(1.5), json!(1.5));
    }

    fn binary_time(negative: bool, days: u32, h: u8, m: u8, s: u8, micros: Option<u32>) -> Vec<u8> {
        let mut body = vec![u8::from(negative)];
        body.extend_from_slice(&days.to_le_bytes());
        body.extend_from_slice(&[h, m, s]);
        if let Some(micros) = micros {
            body.extend_from_slice(&micros.to_le_bytes());
        }
        let mut raw = vec![body.len() as u8];
        raw.extend(body);
        raw
    }

    #[test]
    fn time_keeps_full_mysql_range() {
        // 838:59:59 is 34 days + 22 hours
        assert_eq!(
            format_time(&binary_time(false, 34, 22, 59, 59, None)).as_deref(),
            Some("838:59:59")
        );
        assert_eq!(
            format_time(&binary_time(true, 0, 1, 0, 0, None)).as_deref(),
            Some("-01:00:00")
        );
        assert_eq!(
            format_time(&binary_time(false, 0, 12, 30, 0, Some(500_000))).as_deref(),
            Some("12:30:00.500000")
        );
        assert_eq!(format_time(&[0]).as_deref(), Some("00:00:00"));
    }

    #[test]
    fn time_accepts_text_encoding() {
        assert_eq!(format_time(b"838:59:59").as_deref(), Some("838:59:59"));
        assert_eq!(format_time(b"-01:00:00").as_deref(), Some("-01:00:00"));
        assert_eq!(format_time(&[]), None);
    }

    // Needs a server that accepts zero dates once sql_mode is cleared
    #[tokio::test]
    #[ignore = "requires database"]
    async fn row_to_json_renders_every_column_type() {
        use sqlx::{Connection, MySqlConnection};

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let mut conn = MySqlConnection::connect(&url).await.expect("connect failed");

        for statement in [
            "SET SESSION sql_mode = ''",
            "CREATE TEMPORARY TABLE column_samples (
                id INT,
                name VARCHAR(32),
                nickname VARCHAR(32) NULL,
                balance DECIMAL(10,2),
                ratio DOUBLE,
                big BIGINT UNSIGNED,
                active TINYINT(1),
                joined DATE,
                seen DATETIME(3),
                zero_day DATE,
                shift TIME,
                back TIME,
                meta JSON,
                avatar BLOB
            )",
            "INSERT INTO column_samples VALUES (
                1, 'ada', NULL, '12.50', 0.25, 18446744073709551615, 1,
                '2024-01-02', '2024-01-02 03:04:05.678', '0000-00-00',
                '838:59:59', '-01:00:00', '{\"a\": [1, 2]}', X'DEAD'
            )",
        ] {
            sqlx::query(statement)
                .execute(&mut conn)
                .await
                .expect("setup failed");
        }

        let row = sqlx::query("SELECT * FROM column_samples")
            .fetch_one(&mut conn)
            .await
            .expect("select failed");
        let object = row_to_json(&row).expect("row should render");

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "id", "name", "nickname", "balance", "ratio", "big", "active", "joined", "seen",
                "zero_day", "shift", "back", "meta", "avatar"
            ]
        );
        assert_eq!(
            Value::Object(object),
            json!({
                "id": 1,
                "name": "ada",
                "nickname": null,
                "balance": "12.50",
                "ratio": 0.25,
                "big": 18446744073709551615u64,
                "active": 1,
                "joined": "2024-01-02T00:00:00.000Z",
                "seen": "2024-01-02T03:04:05.678Z",
                "zero_day": null,
                "shift": "838:59:59",
                "back": "-01:00:00",
                "meta": { "a": [1, 2] },
                "avatar": { "type": "Buffer", "data": [222, 173] }
            })
        );
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn fetch_users_caps_rows() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = MySqlPool::connect(&url).await.expect("pool creation failed");

        let users = fetch_users(&pool).await.expect("users query failed");
        assert!(users.len() <= USERS_LIMIT);
    }
}
