//! Send an SMS through AWS Pinpoint from a phone number you own.
use sms_aws_pinpoint::PinpointSmsClient;
use sms_core::{SendRequest, SmsGateway};

use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let region = arg_or_env("--region", "AWS_REGION")?;
    let from = arg_or_env("--from", "SMS_FROM")?;
    let to = arg_or_env("--to", "SMS_TO")?;
    let text = arg_or_env("--text", "SMS_TEXT")?;

    let client = PinpointSmsClient::from_env(region).await?;
    let res = client
        .send_sms(SendRequest {
            to: &to,
            from: &from,
            text: &text,
        })
        .await?;
    println!("Sent via {} with id {}", res.provider, res.id);
    Ok(())
}

fn arg_or_env(flag: &str, env_key: &str) -> Result<String, String> {
    let args: Vec<String> = env::args().collect();
    if let Some(idx) = args.iter().position(|a| a == flag) {
        if let Some(value) = args.get(idx + 1) {
            return Ok(value.clone());
        }
    }
    env::var(env_key).map_err(|_| format!("missing {} (arg {} or env {})", flag, flag, env_key))
}
