use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::application::services::health::HealthProbe;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct CheckHealthUseCase {
    probes: Vec<Arc<dyn HealthProbe>>,
}

pub struct HealthReport {
    pub healthy: bool,
    pub services: Vec<(&'static str, bool)>,
}

impl CheckHealthUseCase {
    pub fn new(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self { probes }
    }

    pub async fn execute(&self) -> HealthReport {
        let mut services = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let healthy = match tokio::time::timeout(PROBE_TIMEOUT, probe.check()).await {
                Ok(Ok(())) => true,
                Ok(Err(err)) => {
                    error!(service = probe.name(), error = %err, "health check failed");
                    false
                }
                Err(_) => {
                    error!(service = probe.name(), "health check timed out");
                    false
                }
            };
            services.push((probe.name(), healthy));
        }

        HealthReport {
            healthy: services.iter().all(|(_, healthy)| *healthy),
            services,
        }
    }
}
