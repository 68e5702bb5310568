//! TopUp Bridge Node
//!
//! Main entry point for the bridge node server

use topup_bridge::NodeBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	NodeBuilder::new().start_server().await
}
