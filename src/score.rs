use serde_json::Value;

/// Risk score attached to a zone
///
/// GeoJSON properties are untyped, so a score can be absent, a usable
/// number, or something that cannot be read as a number. The last case
/// keeps the raw text so it can be reported.
#[derive(Clone, Debug, PartialEq)]
pub enum RiskScore {
    /// Property absent or `null`
    Missing,

    /// Finite numeric score
    Numeric(f64),

    /// Present but not coercible to a finite number
    Invalid(String),
}

impl RiskScore {
    /// Reads a score from an optional GeoJSON property value
    ///
    /// Numbers and numeric strings (surrounding whitespace allowed) become
    /// `Numeric`; non-finite results, booleans, arrays, objects and other
    /// strings become `Invalid`.
    ///
    /// # Examples
    /// ```
    /// use flood_monitor::score::RiskScore;
    /// use serde_json::json;
    ///
    /// assert_eq!(RiskScore::from_property(None), RiskScore::Missing);
    /// assert_eq!(RiskScore::from_property(Some(&json!(4.5))), RiskScore::Numeric(4.5));
    /// assert_eq!(RiskScore::from_property(Some(&json!(" 7 "))), RiskScore::Numeric(7.0));
    /// ```
    pub fn from_property(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => RiskScore::Missing,
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v.is_finite() => RiskScore::Numeric(v),
                _ => RiskScore::Invalid(n.to_string()),
            },
            Some(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => RiskScore::Numeric(v),
                _ => RiskScore::Invalid(s.clone()),
            },
            Some(other) => RiskScore::Invalid(other.to_string()),
        }
    }

    /// Numeric value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            RiskScore::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    /// Formats the score for display, `N/A` when there is no number
    pub fn display(&self, precision: usize) -> String {
        match self {
            RiskScore::Numeric(v) => format!("{:.*}", precision, v),
            _ => "N/A".to_string(),
        }
    }
}

impl From<f64> for RiskScore {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            RiskScore::Numeric(value)
        } else {
            RiskScore::Invalid(value.to_string())
        }
    }
}

impl From<Option<f64>> for RiskScore {
    fn from(value: Option<f64>) -> Self {
        value.map_or(RiskScore::Missing, RiskScore::from)
    }
}

impl From<&str> for RiskScore {
    fn from(value: &str) -> Self {
        RiskScore::from_property(Some(&Value::String(value.to_string())))
    }
}
