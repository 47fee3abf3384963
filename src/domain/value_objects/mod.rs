use std::collections::{BTreeSet, HashMap};

use crate::domain::models::Network;

const TM_PREFIXES: &[&str] = &[
    "0905", "0906", "0907", "0908", "0909", "0910", "0911", "0912", "0913", "0914", "0915",
    "0916", "0917", "0918", "0919", "0920", "0921", "0922", "0923", "0924", "0925", "0926",
    "0927", "0928", "0929", "0930", "0931", "0932", "0933", "0934", "0935", "0936", "0937",
    "0938", "0939", "0940", "0941", "0942", "0943", "0944", "0945", "0946", "0947", "0948",
    "0949", "0950",
];

const GLOBE_PREFIXES: &[&str] = &[
    "0905", "0906", "0915", "0916", "0917", "0918", "0919", "0925", "0926", "0927", "0928",
    "0929", "0930", "0931", "0932", "0933", "0934", "0935", "0936", "0937", "0938", "0939",
    "0940", "0941", "0942", "0943", "0944", "0945", "0946", "0947", "0948", "0949", "0950",
    "0951", "0952", "0953", "0954", "0955", "0956", "0957", "0958", "0959", "0960", "0961",
    "0962", "0963", "0964", "0965", "0966", "0967", "0968", "0969", "0970", "0971", "0972",
    "0973", "0974", "0975", "0976", "0977", "0978", "0979", "0980", "0981", "0982", "0983",
    "0984", "0985", "0986", "0987", "0988", "0989", "0990", "0991", "0992", "0993", "0994",
    "0995", "0996", "0997", "0998", "0999",
];

/// Four-digit number prefixes accepted per network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkPrefixes {
    tables: HashMap<Network, BTreeSet<String>>,
}

impl NetworkPrefixes {
    /// A table set with no networks at all; every lookup fails closed.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn with_network<I, S>(mut self, network: Network, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(network, prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn get(&self, network: Network) -> Option<&BTreeSet<String>> {
        self.tables.get(&network)
    }

    pub fn contains(&self, network: Network, prefix: &str) -> bool {
        self.get(network)
            .map(|table| table.contains(prefix))
            .unwrap_or(false)
    }
}

impl Default for NetworkPrefixes {
    fn default() -> Self {
        Self::empty()
            .with_network(Network::Tm, TM_PREFIXES.iter().copied())
            .with_network(Network::Globe, GLOBE_PREFIXES.iter().copied())
    }
}
