//! Streaming invocation diagnostic.
//!
//! Sends a prompt with the streaming flag set and drains the fragment stream
//! through the chunk interpreter, so partial text is visible as it arrives.
//! Any invocation failure is reported once and the process exits normally.

use std::time::Instant;

use agent_runtime_client::prelude::*;
use agent_runtime_probe::{config, logger, report};

const PROMPT: &str = "Hello, agent! Tell me something interesting about systems programming.";

#[tokio::main]
async fn main() {
    config::init_env();
    logger::init();
    if let Err(err) = run().await {
        report::failure(&err);
    }
}

async fn run() -> Result<(), InvokeError> {
    let probe = config::ProbeConfig::from_env()?;
    let runtime = RemoteAgentRuntime::from_env()?;
    tracing::debug!(agent_id = %probe.agent_id, "probe configured");

    let payload = AgentPayload::new(PROMPT).streaming(true);
    let request = probe.request(&payload)?;

    report::section("Starting agent invocation (streaming)");
    println!("agent id: {}", probe.agent_id);
    println!("payload:  {}", String::from_utf8_lossy(&request.payload));

    let invoke_started = Instant::now();
    let response = runtime.invoke(request).await?;
    println!(
        "response ready after {:.3}s",
        invoke_started.elapsed().as_secs_f64()
    );

    match response {
        InvokeResponse::Stream(stream) => {
            report::section("Receiving fragments");
            let mut writer = EffectWriter::stdout();
            let stats = drain_fragments(stream, &mut writer).await?;
            if let Some(latency) = stats.time_to_first_fragment() {
                println!("\nfirst fragment after {:.3}s", latency.as_secs_f64());
            }
            if stats.total_fragments() == 0 {
                println!("warning: no fragments received");
            }
        }
        InvokeResponse::Single(value) => {
            report::section("Response received (single value)");
            let pretty =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            println!("{pretty}");
        }
    }
    println!("\n{}\n", report::rule());
    Ok(())
}
