//! Property-based tests for the correlation store.
//!
//! - Inverse law: after a successful save both lookups return the other side
//! - Uniqueness: no endpoint or host is ever linked twice within a type

use proptest::prelude::*;
use shoplink_db::Database;
use shoplink_mapping::PrimaryKeyMapper;
use shoplink_types::IdentityType;
use std::collections::HashMap;

fn identity_type_strategy() -> impl Strategy<Value = IdentityType> {
    prop::sample::select(IdentityType::ALL.to_vec())
}

fn link_strategy() -> impl Strategy<Value = (IdentityType, String, i64)> {
    (
        identity_type_strategy(),
        prop::string::string_regex("[a-f0-9]{1,4}").unwrap(),
        0i64..16,
    )
}

proptest! {
    #[test]
    fn saved_links_obey_inverse_law(links in prop::collection::vec(link_strategy(), 1..40)) {
        let mapper = PrimaryKeyMapper::new(Database::open_in_memory().unwrap());
        let mut accepted: Vec<(IdentityType, String, i64)> = Vec::new();

        for (t, endpoint, host) in links {
            if mapper.save(t, &endpoint, host).is_ok() {
                prop_assert_eq!(mapper.get_host_id(t, &endpoint).unwrap(), Some(host));
                prop_assert_eq!(mapper.get_endpoint_id(t, host).unwrap(), Some(endpoint.clone()));
                if !accepted.contains(&(t, endpoint.clone(), host)) {
                    accepted.push((t, endpoint, host));
                }
            }
        }

        // Every accepted link is still intact at the end.
        for (t, endpoint, host) in &accepted {
            prop_assert_eq!(mapper.get_host_id(*t, endpoint).unwrap(), Some(*host));
        }
        prop_assert_eq!(mapper.count(None).unwrap(), accepted.len() as u64);
    }

    #[test]
    fn endpoints_and_hosts_are_unique_per_type(
        links in prop::collection::vec(link_strategy(), 1..40),
    ) {
        let mapper = PrimaryKeyMapper::new(Database::open_in_memory().unwrap());
        let mut by_endpoint: HashMap<(IdentityType, String), i64> = HashMap::new();
        let mut by_host: HashMap<(IdentityType, i64), String> = HashMap::new();

        for (t, endpoint, host) in links {
            let known_endpoint = by_endpoint.get(&(t, endpoint.clone()));
            let expected_ok = match (known_endpoint, by_host.get(&(t, host))) {
                (None, None) => true,
                (Some(h), Some(e)) => *h == host && *e == endpoint,
                _ => false,
            };
            let result = mapper.save(t, &endpoint, host);
            prop_assert_eq!(result.is_ok(), expected_ok);
            if expected_ok {
                by_endpoint.insert((t, endpoint.clone()), host);
                by_host.insert((t, host), endpoint);
            }
        }
    }
}
