//! Service name to base URL resolution.
//!
//! Every [`ServiceName`] has exactly one entry in the active table, so
//! resolving a typed name never fails. String lookups that do not name a known
//! service fall back to the `common` entry.

use std::collections::BTreeMap;

use crate::service::{Environment, ServiceName};

/// Base URL per service for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrlTable {
    urls: BTreeMap<ServiceName, String>,
}

impl BaseUrlTable {
    /// Built-in table for `environment`.
    pub fn for_environment(environment: Environment) -> Self {
        let urls = ServiceName::ALL
            .iter()
            .map(|service| (*service, service.default_base_url(environment)))
            .collect();
        Self { urls }
    }

    pub fn get(&self, service: ServiceName) -> &str {
        // The table is seeded with every service and entries are only ever replaced.
        self.urls.get(&service).map(String::as_str).unwrap_or_default()
    }

    /// Replaces entries by key; services absent from `overrides` keep their URL.
    pub fn merge<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (ServiceName, S)>,
        S: Into<String>,
    {
        for (service, url) in overrides {
            self.urls.insert(service, url.into());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceName, &str)> {
        self.urls.iter().map(|(service, url)| (*service, url.as_str()))
    }
}

/// Resolves logical services to concrete base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRouter {
    environment: Environment,
    table: BaseUrlTable,
}

impl Default for ServiceRouter {
    fn default() -> Self {
        Self::new(Environment::Production)
    }
}

impl ServiceRouter {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            table: BaseUrlTable::for_environment(environment),
        }
    }

    pub const fn environment(&self) -> Environment {
        self.environment
    }

    pub fn table(&self) -> &BaseUrlTable {
        &self.table
    }

    pub fn resolve(&self, service: ServiceName) -> &str {
        self.table.get(service)
    }

    /// Resolves a raw service identifier, using `common` for anything unrecognized.
    pub fn resolve_name(&self, service: &str) -> &str {
        let service = service.parse().unwrap_or(ServiceName::Common);
        self.resolve(service)
    }

    pub fn set_base_urls<I, S>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (ServiceName, S)>,
        S: Into<String>,
    {
        self.table.merge(overrides);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_service_resolves_in_both_environments() {
        let production = ServiceRouter::new(Environment::Production);
        let sandbox = ServiceRouter::new(Environment::Sandbox);

        for service in ServiceName::ALL {
            assert_eq!(
                production.resolve(service),
                service.default_base_url(Environment::Production)
            );
            assert_eq!(
                sandbox.resolve(service),
                service.default_base_url(Environment::Sandbox)
            );
        }
        assert_eq!(
            sandbox.resolve(ServiceName::Content),
            "https://content-api-sandbox.wildberries.ru"
        );
    }

    #[test]
    fn unknown_name_falls_back_to_common_of_active_table() {
        let router = ServiceRouter::new(Environment::Sandbox);

        assert_eq!(
            router.resolve_name("not-a-service"),
            "https://common-api-sandbox.wildberries.ru"
        );
        assert_eq!(
            router.resolve_name("Finance"),
            "https://finance-api-sandbox.wildberries.ru"
        );
    }

    #[test]
    fn merge_replaces_only_named_entries() {
        let mut router = ServiceRouter::default();
        router.set_base_urls([(ServiceName::Common, "https://t.example")]);

        assert_eq!(router.resolve(ServiceName::Common), "https://t.example");
        for service in ServiceName::ALL.iter().skip(1) {
            assert_eq!(
                router.resolve(*service),
                service.default_base_url(Environment::Production)
            );
        }
    }

    #[test]
    fn whole_table_can_be_swapped_by_merging_another_environment() {
        let mut router = ServiceRouter::new(Environment::Production);
        let sandbox = BaseUrlTable::for_environment(Environment::Sandbox);
        router.set_base_urls(
            sandbox
                .iter()
                .map(|(service, url)| (service, url.to_owned()))
                .collect::<Vec<_>>(),
        );

        assert_eq!(router.table(), &sandbox);
    }
}
