use std::time::Duration;

// go style duration strings, as written into the raft block:
// "500ms", "1.5s", "1m30s". Negative durations are rejected.
pub fn parse_duration(input: &str) -> std::result::Result<Duration, String> {
    let s = input.strip_prefix('+').unwrap_or(input);
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(format!("invalid duration {:?}", input));
    }

    let mut nanos = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return Err(format!("invalid duration {:?}", input));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration {:?}", input))?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => return Err(format!("missing unit in duration {:?}", input)),
            _ => return Err(format!("unknown unit {:?} in duration {:?}", unit, input)),
        };

        nanos += value * scale;
        rest = tail;
    }

    if nanos > u64::MAX as f64 {
        return Err(format!("duration {:?} overflows", input));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::parse_duration;
    use anyhow::{anyhow, Result};

    #[test]
    fn test_parse_duration() -> Result<()> {
        let cases = [
            ("0", Duration::ZERO),
            ("1s", Duration::from_secs(1)),
            ("+3s", Duration::from_secs(3)),
            ("500ms", Duration::from_millis(500)),
            ("120s", Duration::from_secs(120)),
            ("1.5s", Duration::from_millis(1500)),
            ("1m30s", Duration::from_secs(90)),
            ("2h", Duration::from_secs(7200)),
            ("250us", Duration::from_micros(250)),
            ("10ns", Duration::from_nanos(10)),
        ];
        for (input, expected) in cases {
            let parsed = parse_duration(input).map_err(|e| anyhow!(e))?;
            assert_eq!(parsed, expected, "parsing {}", input);
        }

        Ok(())
    }

    #[test]
    fn test_parse_duration_invalid() -> Result<()> {
        for input in ["", "3", "-1s", "3 seconds", "2d", "s", ".s", "1.2.3s"] {
            assert!(parse_duration(input).is_err(), "{} should not parse", input);
        }

        let err = parse_duration("5").unwrap_err();
        assert!(err.contains("missing unit"));

        Ok(())
    }
}
