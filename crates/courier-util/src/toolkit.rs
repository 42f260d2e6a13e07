//! The configure-once handle request handlers call into.
//!
//! A [`Toolkit`] owns the diagnostic sink, the response renderer and the
//! cast policy. Build one at startup and share it (it is `Send + Sync`).
//! Every method returns a plain value: failures are reported, never
//! returned. Reach for [`crate::convert`] when the error matters.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;

use crate::body;
use crate::config::{CastPolicy, UtilityConfig};
use crate::convert;
use crate::error::{ErrorKind, Recovered, UtilityError};
use crate::form::{self, FormData};
use crate::render::Render;
use crate::report::{Reporter, TracingReporter};
use crate::value::Value;

#[derive(Clone)]
pub struct Toolkit {
    reporter: Arc<dyn Reporter>,
    render: Render,
    config: UtilityConfig,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("render", &self.render)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(Arc::new(TracingReporter), Render::default())
    }
}

impl Toolkit {
    pub fn new(reporter: Arc<dyn Reporter>, render: Render) -> Self {
        Self {
            reporter,
            render,
            config: UtilityConfig::default(),
        }
    }

    /// Tracing reporter, default renderer, config from the environment.
    pub fn from_env() -> Self {
        Self::default().with_config(UtilityConfig::from_env())
    }

    pub fn with_config(mut self, config: UtilityConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_render(mut self, render: Render) -> Self {
        self.render = render;
        self
    }

    pub fn config(&self) -> &UtilityConfig {
        &self.config
    }

    pub fn render(&self) -> &Render {
        &self.render
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn print(&self, message: impl fmt::Display) {
        self.reporter.info(&message.to_string());
    }

    pub fn print_error(&self, operation: &'static str, error: &UtilityError) {
        self.reporter.failure(operation, error);
    }

    /// Unwrap `result`, reporting and then panicking on `Err`.
    ///
    /// For call sites that cannot continue without the value.
    pub fn check<T, E>(&self, operation: &'static str, result: Result<T, E>) -> T
    where
        E: Into<UtilityError>,
    {
        match result {
            Ok(value) => value,
            Err(err) => {
                let err = err.into();
                self.reporter.failure(operation, &err);
                panic!("{operation}: {err}");
            }
        }
    }

    pub fn int64(&self, input: &str) -> i64 {
        self.settle("int64", convert::parse_i64(input))
    }

    pub fn int(&self, input: &str) -> i32 {
        self.settle("int", convert::parse_i32(input))
    }

    pub fn float64(&self, value: &Value) -> f64 {
        self.strict("float64", value, convert::to_f64(value))
    }

    pub fn float_to_int(&self, value: &Value) -> i64 {
        self.strict("float_to_int", value, convert::float_to_int(value))
    }

    pub fn to_int(&self, value: &Value) -> i64 {
        self.strict("to_int", value, convert::to_int(value))
    }

    pub fn to_string(&self, value: &Value) -> String {
        convert::to_string(value)
    }

    pub fn convert_map(&self, value: &Value) -> Option<Map<String, serde_json::Value>> {
        self.strict("convert_map", value, convert::convert_map(value))
    }

    pub fn json_to_map(&self, value: &Value) -> Option<Map<String, serde_json::Value>> {
        self.strict("json_to_map", value, convert::json_to_map(value))
    }

    /// Compact JSON bytes, or an empty vector if serialization failed.
    pub fn marshal<T: Serialize + ?Sized>(&self, value: &T) -> Vec<u8> {
        self.settle("marshal", convert::encode_json(value))
    }

    /// Decode into `dest`; on failure `dest` is left as it was.
    pub fn unmarshal_into<T: DeserializeOwned>(&self, body: &[u8], dest: &mut T) {
        self.settle("unmarshal", convert::decode_json_into(body, dest));
    }

    pub fn unmarshal<T: DeserializeOwned + Default>(&self, body: &[u8]) -> T {
        let mut dest = T::default();
        self.unmarshal_into(body, &mut dest);
        dest
    }

    /// Whatever could be read, even if the stream failed midway.
    pub fn read_all<R: Read>(&self, reader: R) -> Vec<u8> {
        self.settle("read_all", body::read_all(reader))
    }

    pub fn parse_form(&self, body: &[u8]) -> FormData {
        self.settle("parse_form", form::parse_form(body))
    }

    fn settle<T>(&self, operation: &'static str, recovered: Recovered<T>) -> T {
        let (value, error) = recovered.into_parts();
        if let Some(err) = error {
            self.reporter.failure(operation, &err);
        }
        value
    }

    fn strict<T>(&self, operation: &'static str, input: &Value, recovered: Recovered<T>) -> T {
        if self.config.report_blank && input.is_blank() {
            self.reporter
                .debug(operation, "blank input, returning zero value");
        }
        if self.config.cast_policy == CastPolicy::Panic {
            if let Some(err) = recovered
                .error
                .as_ref()
                .filter(|e| e.kind() == ErrorKind::TypeMismatch)
            {
                self.reporter.failure(operation, err);
                panic!("{err}");
            }
        }
        self.settle(operation, recovered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use serde::Deserialize;

    fn toolkit() -> (Toolkit, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let toolkit = Toolkit::new(reporter.clone(), Render::default());
        (toolkit, reporter)
    }

    fn panicking() -> (Toolkit, Arc<MemoryReporter>) {
        let (toolkit, reporter) = toolkit();
        let toolkit = toolkit.with_config(UtilityConfig {
            cast_policy: CastPolicy::Panic,
            ..UtilityConfig::default()
        });
        (toolkit, reporter)
    }

    #[test]
    fn int_conversions_report_bad_input() {
        let (tk, reporter) = toolkit();
        assert_eq!(tk.int("100"), 100);
        assert_eq!(tk.int(""), 0);
        assert_eq!(tk.int64("1234567890121316465"), 1_234_567_890_121_316_465);
        assert!(reporter.is_empty());

        assert_eq!(tk.int64("abc"), 0);
        assert_eq!(tk.int("99999999999"), i32::MAX);
        let lines = reporter.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("int64 [invalid_integer]"));
        assert!(lines[1].starts_with("int [integer_out_of_range]"));
    }

    #[test]
    fn recover_policy_reports_mismatch_and_returns_zero() {
        let (tk, reporter) = toolkit();
        assert_eq!(tk.to_int(&"12".into()), 0);
        assert_eq!(tk.float_to_int(&Value::Int(3)), 0);
        assert_eq!(tk.float64(&true.into()), 0.0);
        assert_eq!(tk.convert_map(&"x".into()), None);
        assert_eq!(reporter.lines().len(), 4);
        assert!(reporter.lines()[0].contains("to_int [type_mismatch]"));
    }

    #[test]
    fn strict_casts_pass_matching_values() {
        let (tk, reporter) = panicking();
        assert_eq!(tk.to_int(&Value::Int(7)), 7);
        assert_eq!(tk.float_to_int(&89.5.into()), 89);
        assert_eq!(tk.float64(&Value::Absent), 0.0);
        assert_eq!(tk.json_to_map(&Value::Absent), None);
        assert!(reporter.is_empty());
    }

    #[test]
    #[should_panic(expected = "to_int: expected int value, found float")]
    fn panic_policy_fails_fast_on_mismatch() {
        let (tk, _reporter) = panicking();
        tk.to_int(&Value::Float(1.0));
    }

    #[test]
    fn panic_policy_still_recovers_decode_errors() {
        let (tk, reporter) = panicking();
        let map = tk.json_to_map(&Value::json(b"not json".to_vec()));
        assert_eq!(map, Some(Map::new()));
        assert_eq!(reporter.lines().len(), 1);
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Fee {
        name: String,
        fees: i64,
    }

    #[test]
    fn marshal_round_trip() {
        let (tk, reporter) = toolkit();
        let fee = Fee {
            name: "Raghav".into(),
            fees: 5000,
        };
        let bytes = tk.marshal(&fee);
        assert_eq!(bytes, br#"{"Name":"Raghav","Fees":5000}"#.to_vec());

        let back: Fee = tk.unmarshal(&bytes);
        assert_eq!(back, fee);
        assert!(reporter.is_empty());
    }

    #[test]
    fn unmarshal_failure_is_reported_not_returned() {
        let (tk, reporter) = toolkit();
        let mut fee = Fee {
            name: "keep".into(),
            fees: 1,
        };
        tk.unmarshal_into(br#"{"Name":"Raghav","Fees":"#, &mut fee);
        assert_eq!(fee.name, "keep");
        assert!(reporter.lines()[0].starts_with("unmarshal [json]"));
    }

    #[test]
    fn print_helpers_reach_reporter() {
        let (tk, reporter) = toolkit();
        tk.print("webhook received");
        tk.print_error("parse_form", &UtilityError::Form("bad".into()));
        assert_eq!(
            reporter.lines(),
            vec!["webhook received", "parse_form [form]: form: bad"]
        );
    }

    #[test]
    fn check_passes_ok_through() {
        let (tk, reporter) = toolkit();
        let value: i32 = tk.check("decode", Ok::<_, UtilityError>(5));
        assert_eq!(value, 5);
        assert!(reporter.is_empty());
    }

    #[test]
    #[should_panic(expected = "decode: json:")]
    fn check_panics_on_err() {
        let (tk, _reporter) = toolkit();
        let parsed = serde_json::from_str::<Fee>("{");
        tk.check("decode", parsed);
    }

    #[test]
    fn blank_notes_go_through_the_reporter() {
        let (tk, reporter) = toolkit();
        let tk = tk.with_config(UtilityConfig {
            report_blank: true,
            ..UtilityConfig::default()
        });
        assert_eq!(tk.to_int(&Value::Absent), 0);
        assert_eq!(tk.to_int(&Value::Int(3)), 3);
        assert_eq!(
            reporter.lines(),
            vec!["to_int [debug]: blank input, returning zero value"]
        );
    }

    #[test]
    fn blank_notes_stay_off_by_default() {
        let (tk, reporter) = toolkit();
        assert_eq!(tk.float64(&"".into()), 0.0);
        assert!(reporter.is_empty());
    }

    #[test]
    fn reporter_accessor_shares_the_injected_sink() {
        let (tk, reporter) = toolkit();
        tk.reporter().info("direct line");
        assert_eq!(reporter.lines(), vec!["direct line"]);

        let other = Arc::new(MemoryReporter::new());
        let tk = tk.with_reporter(other.clone());
        tk.print("rerouted");
        assert_eq!(other.lines(), vec!["rerouted"]);
        assert_eq!(reporter.lines().len(), 1);
    }

    #[test]
    fn toolkit_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Toolkit>();
        assert!(format!("{:?}", Toolkit::default()).starts_with("Toolkit"));
    }
}
