//! Input validators for the setup wizard.
//!
//! Each validator is an independent predicate over one input string; the
//! wizard owns re-asking on failure.

use regex::Regex;

pub const MIN_RATE_LIMIT: u64 = 100;
pub const MAX_RATE_LIMIT: u64 = 20_000_000;

pub const AWS_REGIONS: &[&str] = &[
    "us-east-2",
    "us-east-1",
    "us-west-1",
    "us-west-2",
    "ap-east-1",
    "ap-south-1",
    "ap-northeast-3",
    "ap-northeast-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-northeast-1",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "me-south-1",
    "sa-east-1",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message: String,
    pub cursor_position: usize,
}

impl ValidationFailure {
    fn at_end(message: impl Into<String>, text: &str) -> Self {
        Self {
            message: message.into(),
            cursor_position: text.len(),
        }
    }
}

pub trait InputValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure>;
}

/// Aurora cluster name: 1 to 60 letters, digits, or hyphens; starts with a
/// letter; no `--`; no trailing hyphen.
#[derive(Debug, Default)]
pub struct ClusterNameValidator;

impl InputValidator for ClusterNameValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        let well_formed = match text.chars().next() {
            Some(first) => {
                first.is_ascii_alphabetic()
                    && text.len() <= 60
                    && text
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
                    && !text.contains("--")
                    && !text.ends_with('-')
            }
            None => false,
        };

        if well_formed {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter a valid Aurora Cluster name",
                text,
            ))
        }
    }
}

#[derive(Debug)]
pub struct EmailValidator {
    pattern: Regex,
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
                .expect("email pattern should compile"),
        }
    }
}

impl InputValidator for EmailValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(ValidationFailure::at_end("Please enter a valid email", text))
        }
    }
}

#[derive(Debug)]
pub struct SlackWebhookValidator {
    pattern: Regex,
}

impl Default for SlackWebhookValidator {
    fn default() -> Self {
        Self {
            pattern: Regex::new(
                r"^https://hooks\.slack\.com/services/T[0-9A-Z]+/B[0-9A-Z]+/[0-9A-Za-z]+$",
            )
            .expect("webhook pattern should compile"),
        }
    }
}

impl InputValidator for SlackWebhookValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter a valid Slack Webhook URL",
                text,
            ))
        }
    }
}

/// 12-digit AWS account id.
#[derive(Debug)]
pub struct AccountIdValidator {
    pattern: Regex,
}

impl Default for AccountIdValidator {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^[0-9]{12}$").expect("account id pattern should compile"),
        }
    }
}

impl InputValidator for AccountIdValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter a valid AWS Account ID",
                text,
            ))
        }
    }
}

/// ARN restricted to the two service namespaces the stacks can protect.
#[derive(Debug)]
pub struct ApiArnValidator {
    pattern: Regex,
}

impl Default for ApiArnValidator {
    fn default() -> Self {
        Self {
            pattern: Regex::new(r"^arn:.*:(apigateway|elasticloadbalancing):.*$")
                .expect("arn pattern should compile"),
        }
    }
}

impl InputValidator for ApiArnValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if self.pattern.is_match(text) {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter a valid AWS API gateway or Elastic Load Balancer ARN",
                text,
            ))
        }
    }
}

#[derive(Debug, Default)]
pub struct RegionValidator;

impl InputValidator for RegionValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if AWS_REGIONS.contains(&text) {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter a valid AWS Region",
                text,
            ))
        }
    }
}

/// Request-rate limit: an all-digit string in 100..=20_000_000.
#[derive(Debug, Default)]
pub struct RateValidator;

impl InputValidator for RateValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        let in_range = !text.is_empty()
            && text.chars().all(|c| c.is_ascii_digit())
            && text
                .parse::<u64>()
                .map(|rate| (MIN_RATE_LIMIT..=MAX_RATE_LIMIT).contains(&rate))
                .unwrap_or(false);

        if in_range {
            Ok(())
        } else {
            Err(ValidationFailure::at_end(
                "Please enter an integer rate between 100 and 20000000 inclusive",
                text,
            ))
        }
    }
}

/// Binary confirm token. Accepts exactly `y` or `no`.
#[derive(Debug, Default)]
pub struct YesOrNoValidator;

impl InputValidator for YesOrNoValidator {
    fn validate(&self, text: &str) -> Result<(), ValidationFailure> {
        if text == "y" || text == "no" {
            Ok(())
        } else {
            Err(ValidationFailure::at_end("Please enter y or n", text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(validator: &dyn InputValidator, text: &str) -> bool {
        validator.validate(text).is_ok()
    }

    #[test]
    fn cluster_name_accepts_letters_digits_and_single_hyphens() {
        let validator = ClusterNameValidator;
        assert!(passes(&validator, "MyCluster-1"));
        assert!(passes(&validator, "a"));
    }

    #[test]
    fn cluster_name_rejects_malformed_names() {
        let validator = ClusterNameValidator;
        assert!(!passes(&validator, "-Bad"));
        assert!(!passes(&validator, "Has--Two"));
        assert!(!passes(&validator, "EndsWith-"));
        assert!(!passes(&validator, "1starts-with-digit"));
        assert!(!passes(&validator, ""));
        assert!(!passes(&validator, &"a".repeat(61)));
    }

    #[test]
    fn cluster_name_failure_reports_cursor_at_end() {
        let failure = ClusterNameValidator
            .validate("-Bad")
            .expect_err("should fail");
        assert_eq!(failure.cursor_position, 4);
        assert_eq!(failure.message, "Please enter a valid Aurora Cluster name");
    }

    #[test]
    fn email_validator_checks_basic_shape() {
        let validator = EmailValidator::default();
        assert!(passes(&validator, "ops@example.com"));
        assert!(passes(&validator, "first.last@sub.example.org"));
        assert!(!passes(&validator, "not-an-email"));
        assert!(!passes(&validator, "missing@tld"));
        assert!(!passes(&validator, "@example.com"));
    }

    #[test]
    fn webhook_validator_requires_slack_services_url() {
        let validator = SlackWebhookValidator::default();
        assert!(passes(
            &validator,
            "https://hooks.slack.com/services/T0AB12CD3/B0EF45GH6/a1B2c3D4e5F6"
        ));
        assert!(!passes(&validator, "https://hooks.slack.com/services/T0/X0/y"));
        assert!(!passes(&validator, "http://hooks.slack.com/services/T0/B0/y"));
        assert!(!passes(&validator, "https://example.com/webhook"));
    }

    #[test]
    fn account_id_requires_exactly_twelve_digits() {
        let validator = AccountIdValidator::default();
        assert!(passes(&validator, "111122223333"));
        assert!(!passes(&validator, "11112222333"));
        assert!(!passes(&validator, "1111222233334"));
        assert!(!passes(&validator, "11112222333a"));
        assert!(!passes(&validator, ""));
    }

    #[test]
    fn api_arn_is_limited_to_two_service_namespaces() {
        let validator = ApiArnValidator::default();
        assert!(passes(
            &validator,
            "arn:aws:apigateway:us-east-1::/restapis/abc123"
        ));
        assert!(passes(
            &validator,
            "arn:aws:elasticloadbalancing:us-east-1:111122223333:loadbalancer/app/my-alb/1234"
        ));
        assert!(!passes(&validator, "arn:aws:s3:::my-bucket"));
        assert!(!passes(&validator, "apigateway:not-an-arn"));
    }

    #[test]
    fn region_validator_is_allow_list_membership() {
        let validator = RegionValidator;
        for region in AWS_REGIONS {
            assert!(passes(&validator, region), "{region} should pass");
        }
        assert!(!passes(&validator, "us-east-3"));
        assert!(!passes(&validator, "US-EAST-1"));
        assert!(!passes(&validator, ""));
    }

    #[test]
    fn rate_validator_is_inclusive_on_both_bounds() {
        let validator = RateValidator;
        assert!(passes(&validator, "100"));
        assert!(passes(&validator, "20000000"));
        assert!(passes(&validator, "2000"));
        assert!(!passes(&validator, "99"));
        assert!(!passes(&validator, "20000001"));
    }

    #[test]
    fn rate_validator_rejects_non_digit_input() {
        let validator = RateValidator;
        assert!(!passes(&validator, "12e3"));
        assert!(!passes(&validator, "-100"));
        assert!(!passes(&validator, ""));
        assert!(!passes(&validator, "99999999999999999999999999"));
    }

    #[test]
    fn yes_or_no_accepts_the_two_literal_tokens() {
        let validator = YesOrNoValidator;
        assert!(passes(&validator, "y"));
        assert!(passes(&validator, "no"));
        assert!(!passes(&validator, "n"));
        assert!(!passes(&validator, "yes"));
        assert!(!passes(&validator, "Y"));
    }
}
