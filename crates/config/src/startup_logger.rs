//! Service startup logging for the TopUp bridge node

use crate::Settings;
use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	// Root package name, not this crate's
	let service_name = "topup-bridge";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== TopUp Bridge Node Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} ({})", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs what the node is about to be built from
pub fn log_network_summary(settings: &Settings) {
	info!("🏭 Factory: {}", settings.network.factory);
	info!("💧 Wrapped native: {}", settings.network.wrapped_native);
	match settings.network.gateway {
		Some(gateway) => info!("🚪 Native gateway: {}", gateway),
		None => info!("🚪 Native gateway: disabled"),
	}
	info!("🔌 Protocol endpoints: {}", settings.protocols.len());

	let enabled = settings.enabled_adapters();
	info!("🌉 Enabled adapters: {}", enabled.len());
	for (name, adapter) in &enabled {
		info!("  - {}: {} at {}", name, adapter.kind, adapter.address);
	}
	info!("🛣️ Configured routes: {}", settings.routes.len());
	for entry in &settings.api_keys {
		info!("🔑 API key for {} from {}", entry.account, entry.key.description());
	}
}

/// Logs service shutdown information
pub fn log_service_shutdown() {
	info!("🛑 TopUp Bridge Node Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs startup completion
pub fn log_startup_complete(bind_address: &str) {
	info!("✅ TopUp Bridge Node Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
	info!("📡 Ready to accept requests");
}
