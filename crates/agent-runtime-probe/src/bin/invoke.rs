//! Non-streaming invocation diagnostic.
//!
//! Reads runtime and agent settings from the environment, sends a bare
//! prompt payload, and prints the response between fixed banners. Any
//! invocation failure is reported once and the process exits normally.

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

    let payload = AgentPayload::new(PROMPT);
    let request = probe.request(&payload)?;

    report::section("Starting agent invocation");
    println!("agent id: {}", probe.agent_id);
    println!("payload:  {}", String::from_utf8_lossy(&request.payload));

    match runtime.invoke(request).await? {
        InvokeResponse::Single(value) => {
            report::section("Response received");
            let pretty =
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            println!("{pretty}");
        }
        InvokeResponse::Stream(stream) => {
            // The runtime may stream even without the streaming flag; drain
            // it through the interpreter rather than dropping it.
            report::section("Response received (streamed)");
            let mut writer = EffectWriter::stdout();
            let stats = drain_fragments(stream, &mut writer).await?;
            if stats.total_fragments() == 0 {
                println!("no fragments received");
            }
        }
    }
    println!("\n{}\n", report::rule());
    Ok(())
}
