//! Prompt loop and settings file for the setup wizard. Validators stay pure;
//! re-asking on failure lives here.

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::validators::{
    AccountIdValidator, ApiArnValidator, ClusterNameValidator, EmailValidator, InputValidator,
    RateValidator, RegionValidator, SlackWebhookValidator, YesOrNoValidator,
};

/// Settings collected by the wizard and consumed by stack synthesis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetupConfig {
    pub account: String,
    pub region: String,
    pub cluster_name: String,
    pub notification_email: String,
    pub webhook_url: String,
    pub request_rate_limit: u64,
    pub protected_api_arn: String,
}

impl SetupConfig {
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let body = serde_json::to_string_pretty(self)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        std::fs::write(path, body)
    }
}

/// Ask until the validator passes. Echoes the failure message before each
/// re-ask. EOF on the input is an error: the wizard cannot proceed without
/// an answer.
pub fn prompt_until_valid(
    prompt: &str,
    validator: &dyn InputValidator,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<String> {
    loop {
        write!(output, "{prompt}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input ended while waiting for '{prompt}'"),
            ));
        }

        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        match validator.validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(failure) => writeln!(output, "{}", failure.message)?,
        }
    }
}

/// Run the full wizard over the given streams. Returns `None` when the
/// operator answers `no` at the final confirmation.
pub fn collect_settings(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> io::Result<Option<SetupConfig>> {
    let account = prompt_until_valid(
        "AWS account id",
        &AccountIdValidator::default(),
        input,
        output,
    )?;
    let region = prompt_until_valid("AWS region", &RegionValidator, input, output)?;
    let cluster_name =
        prompt_until_valid("Aurora cluster name", &ClusterNameValidator, input, output)?;
    let notification_email = prompt_until_valid(
        "Notification email",
        &EmailValidator::default(),
        input,
        output,
    )?;
    let webhook_url = prompt_until_valid(
        "Slack webhook URL",
        &SlackWebhookValidator::default(),
        input,
        output,
    )?;
    let rate = prompt_until_valid("Request rate limit", &RateValidator, input, output)?;
    let protected_api_arn = prompt_until_valid(
        "Protected API or load balancer ARN",
        &ApiArnValidator::default(),
        input,
        output,
    )?;
    let confirmed = prompt_until_valid(
        "Write configuration? (y/no)",
        &YesOrNoValidator,
        input,
        output,
    )?;

    if confirmed != "y" {
        return Ok(None);
    }

    Ok(Some(SetupConfig {
        account,
        region,
        cluster_name,
        notification_email,
        webhook_url,
        request_rate_limit: rate
            .parse()
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?,
        protected_api_arn,
    }))
}
