// ABOUTME: Provider selection by name and enum dispatch over the compiled-in adapters
// ABOUTME: Lets callers pick a provider from configuration and still call it through ExpressTrace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Express Trace Contributors

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{CallbackFields, ExpressTrace};
use crate::errors::{ConfigError, TraceResult};
use crate::models::{SubscribeRequest, TrackingResult};

#[cfg(feature = "provider-fuqing")]
use crate::fuqing::FuqingProvider;
#[cfg(feature = "provider-kuaidi100")]
use crate::kuaidi100::Kuaidi100Provider;

/// Supported courier query providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Kuaidi100 poll API
    Kuaidi100,
    /// Fuqing via the Aliyun API market
    Fuqing,
}

impl ProviderKind {
    /// Every provider, compiled in or not
    pub const ALL: [Self; 2] = [Self::Kuaidi100, Self::Fuqing];

    /// Provider name as used in configuration and logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kuaidi100 => "kuaidi100",
            Self::Fuqing => "fuqing",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownProvider(s.to_owned()))
    }
}

/// One configured adapter, dispatched without boxing
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum TraceProvider {
    /// Kuaidi100 adapter
    #[cfg(feature = "provider-kuaidi100")]
    Kuaidi100(Kuaidi100Provider),
    /// Fuqing adapter
    #[cfg(feature = "provider-fuqing")]
    Fuqing(FuqingProvider),
}

impl TraceProvider {
    /// Which provider this is
    #[must_use]
    pub const fn kind(&self) -> ProviderKind {
        match *self {
            #[cfg(feature = "provider-kuaidi100")]
            Self::Kuaidi100(_) => ProviderKind::Kuaidi100,
            #[cfg(feature = "provider-fuqing")]
            Self::Fuqing(_) => ProviderKind::Fuqing,
        }
    }

    fn inner(&self) -> &dyn ExpressTrace {
        match *self {
            #[cfg(feature = "provider-kuaidi100")]
            Self::Kuaidi100(ref provider) => provider,
            #[cfg(feature = "provider-fuqing")]
            Self::Fuqing(ref provider) => provider,
        }
    }
}

#[cfg(feature = "provider-kuaidi100")]
impl From<Kuaidi100Provider> for TraceProvider {
    fn from(provider: Kuaidi100Provider) -> Self {
        Self::Kuaidi100(provider)
    }
}

#[cfg(feature = "provider-fuqing")]
impl From<FuqingProvider> for TraceProvider {
    fn from(provider: FuqingProvider) -> Self {
        Self::Fuqing(provider)
    }
}

#[async_trait]
impl ExpressTrace for TraceProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    async fn subscribe(&self, request: &SubscribeRequest) -> TraceResult<()> {
        self.inner().subscribe(request).await
    }

    fn handle_callback(
        &self,
        order_id: i64,
        fields: &CallbackFields,
    ) -> TraceResult<TrackingResult> {
        self.inner().handle_callback(order_id, fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_names() {
        assert_eq!("kuaidi100".parse::<ProviderKind>().unwrap(), ProviderKind::Kuaidi100);
        assert_eq!(" Fuqing ".parse::<ProviderKind>().unwrap(), ProviderKind::Fuqing);
        assert_eq!(
            "sf-express".parse::<ProviderKind>().unwrap_err(),
            ConfigError::UnknownProvider("sf-express".to_owned())
        );
    }

    #[test]
    fn test_display_matches_serde() {
        for kind in ProviderKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.to_string());
        }
    }

    #[cfg(all(feature = "provider-kuaidi100", feature = "provider-fuqing"))]
    #[test]
    fn test_dispatch_reports_inner_name() {
        use crate::fuqing::FuqingConfig;
        use crate::kuaidi100::Kuaidi100Config;

        let kuaidi100: TraceProvider = Kuaidi100Provider::new(Kuaidi100Config::new(
            "key",
            "customer",
            "https://example.com/cb",
            "salt",
        ))
        .unwrap()
        .into();
        let fuqing: TraceProvider =
            FuqingProvider::new(FuqingConfig::new("k", "s", "c", "https://example.com/cb"))
                .unwrap()
                .into();

        assert_eq!(kuaidi100.name(), "kuaidi100");
        assert_eq!(kuaidi100.kind(), ProviderKind::Kuaidi100);
        assert_eq!(fuqing.name(), "fuqing");
        assert_eq!(fuqing.kind(), ProviderKind::Fuqing);
    }
}
