//! Webserver startup

use crate::prelude::*;
use crate::routes;

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		warn!("Cannot listen for shutdown signal: {}", err);
		std::future::pending::<()>().await;
	}
	info!("Shutting down");
}

pub async fn serve(app: App) -> ClResult<()> {
	let router = routes::init(app.clone());

	let listener = tokio::net::TcpListener::bind(&*app.opts.listen).await.inspect_err(|err| {
		error!("FATAL: Cannot listen on {}: {}", app.opts.listen, err);
	})?;
	info!("Listening on {}", listener.local_addr()?);

	axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

	Ok(())
}

// vim: ts=4
