use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use hookline_core::{DispatchLog, DispatchRule, DispatchStatus, IngestRequest, LogId};

/// Response body recorded for a successful delivery.
const SUCCESS_BODY: &str = r#"{"status": "ok"}"#;
/// Response body recorded for a failed delivery.
const FAILURE_BODY: &str = r#"{"error": "upstream service unavailable"}"#;

/// Fixed processing offset added to the request timestamp before jitter, ms.
const PROCESSING_OFFSET_MS: i64 = 50;

/// Synthesizes dispatch outcomes for matched (request, rule) pairs.
///
/// All randomness flows through one owned [`StdRng`], so a fixed seed makes
/// every produced log byte-identical across runs — including the log id,
/// which is derived from the generator rather than from entropy.
///
/// Outcome model: success with probability 2/3. Success is a 200 with no
/// retries; failure is a 502 with retries drawn uniformly from the rule's
/// retry budget. Simulated delivery takes 150–500 ms and completes a small
/// jittered offset after the request was received.
#[derive(Debug)]
pub struct DispatchSimulator {
    rng: StdRng,
}

impl DispatchSimulator {
    /// Create a simulator with a fixed seed. Identical seeds reproduce
    /// identical outcome sequences.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a simulator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Synthesize one dispatch outcome for a request and its matched rule.
    ///
    /// Neither input is mutated; the caller appends the returned log to the
    /// store. Draw order is fixed (outcome, retries, execution time, jitter,
    /// id) so seeded runs stay reproducible.
    pub fn simulate(&mut self, request: &IngestRequest, rule: &DispatchRule) -> DispatchLog {
        let succeeded = self.rng.gen_range(0..3u8) < 2;

        let (status, status_code, retry_attempts, response_body) = if succeeded {
            (DispatchStatus::Success, 200, 0, SUCCESS_BODY)
        } else {
            let retries = if rule.retry_count == 0 {
                0
            } else {
                self.rng.gen_range(0..rule.retry_count)
            };
            (DispatchStatus::Failed, 502, retries, FAILURE_BODY)
        };

        let execution_time_ms = self.rng.gen_range(150..500u64);
        let jitter_ms = self.rng.gen_range(0..200i64);
        let completed_at =
            request.received_at + Duration::milliseconds(PROCESSING_OFFSET_MS + jitter_ms);
        let id = LogId::new(Uuid::from_u128(self.rng.gen()).to_string());

        DispatchLog {
            id,
            request_id: request.id.clone(),
            rule_id: rule.meta.id.clone(),
            rule_name: rule.name.clone(),
            target_url: rule.target_url.clone(),
            status,
            status_code,
            retry_attempts,
            response_body: response_body.to_owned(),
            completed_at,
            execution_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use hookline_core::config::ConfigMeta;
    use hookline_core::ConfigId;

    fn rule(retry_count: u32) -> DispatchRule {
        let mut meta = ConfigMeta::draft();
        meta.id = ConfigId::new("rule-crm");
        DispatchRule {
            meta,
            name: "Forward to CRM".into(),
            pattern: ".*webhook.*".into(),
            target_url: "https://downstream.crm.com/api/contacts".into(),
            method: "POST".into(),
            headers: "{}".into(),
            retry_count,
            timeout_ms: 30_000,
        }
    }

    fn request() -> IngestRequest {
        IngestRequest::new(
            "POST",
            "https://api.example.com/v1/webhook/hubspot/5",
            Utc::now(),
        )
    }

    #[test]
    fn identical_seed_and_inputs_are_byte_identical() {
        let req = request();
        let rule = rule(3);
        let a = DispatchSimulator::from_seed(7).simulate(&req, &rule);
        let b = DispatchSimulator::from_seed(7).simulate(&req, &rule);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let req = request();
        let rule = rule(3);
        let a = DispatchSimulator::from_seed(1).simulate(&req, &rule);
        let b = DispatchSimulator::from_seed(2).simulate(&req, &rule);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn success_outcome_shape() {
        let req = request();
        let rule = rule(3);
        let mut sim = DispatchSimulator::from_seed(0);
        let log = loop {
            let log = sim.simulate(&req, &rule);
            if log.status == DispatchStatus::Success {
                break log;
            }
        };
        assert_eq!(log.status_code, 200);
        assert_eq!(log.retry_attempts, 0);
        assert_eq!(log.response_body, SUCCESS_BODY);
        assert_eq!(log.rule_id.as_str(), "rule-crm");
        assert_eq!(log.rule_name, "Forward to CRM");
    }

    #[test]
    fn failure_outcome_shape() {
        let req = request();
        let rule = rule(3);
        let mut sim = DispatchSimulator::from_seed(0);
        let log = loop {
            let log = sim.simulate(&req, &rule);
            if log.status == DispatchStatus::Failed {
                break log;
            }
        };
        assert_eq!(log.status_code, 502);
        assert!(log.retry_attempts < 3);
        assert_eq!(log.response_body, FAILURE_BODY);
    }

    #[test]
    fn zero_retry_budget_never_retries() {
        let req = request();
        let rule = rule(0);
        let mut sim = DispatchSimulator::from_seed(42);
        for _ in 0..50 {
            let log = sim.simulate(&req, &rule);
            assert_eq!(log.retry_attempts, 0);
        }
    }

    #[test]
    fn execution_time_and_completion_are_bounded() {
        let req = request();
        let rule = rule(3);
        let mut sim = DispatchSimulator::from_seed(9);
        for _ in 0..50 {
            let log = sim.simulate(&req, &rule);
            assert!((150..500).contains(&log.execution_time_ms));
            let offset = (log.completed_at - req.received_at).num_milliseconds();
            assert!((50..250).contains(&offset));
        }
    }

    #[test]
    fn rough_success_ratio_matches_model() {
        let req = request();
        let rule = rule(3);
        let mut sim = DispatchSimulator::from_seed(1234);
        let successes = (0..3000)
            .filter(|_| sim.simulate(&req, &rule).status == DispatchStatus::Success)
            .count();
        // Expect ~2000 of 3000; allow a generous band.
        assert!((1800..2200).contains(&successes), "got {successes}");
    }
}
