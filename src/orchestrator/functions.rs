// Standard library
use std::sync::Arc;

// 3rd party crates
use reqwest::Client;

// Project imports
use crate::providers::ip2location::Ip2Location;
use crate::providers::ip_api::IpApiCom;
use crate::providers::ipapi::IpApi;
use crate::providers::ipgeolocation::IpGeolocation;
use crate::providers::ipinfo::IpInfo;
use crate::providers::ipstack::IpStack;
use crate::providers::maxmind::MaxMind;
use crate::providers::{GeoProvider, ProviderKind};
use crate::settings::types::Providers;

/// Instantiates every adapter from its settings, enabled or not.
pub fn build_providers(settings: &Providers, client: &Client) -> Vec<Arc<dyn GeoProvider>> {
    ProviderKind::ALL
        .iter()
        .map(|kind| {
            let config = settings.get(*kind).clone();
            let client = client.clone();
            let provider: Arc<dyn GeoProvider> = match kind {
                ProviderKind::IpInfo => Arc::new(IpInfo::new(config, client)),
                ProviderKind::IpApi => Arc::new(IpApi::new(config, client)),
                ProviderKind::IpApiCom => Arc::new(IpApiCom::new(config, client)),
                ProviderKind::IpGeolocation => Arc::new(IpGeolocation::new(config, client)),
                ProviderKind::MaxMind => Arc::new(MaxMind::new(config, client)),
                ProviderKind::IpStack => Arc::new(IpStack::new(config, client)),
                ProviderKind::Ip2Location => Arc::new(Ip2Location::new(config, client)),
            };
            provider
        })
        .collect()
}
