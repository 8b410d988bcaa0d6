//! Navigation table contract.
//!
//! The navigation table itself belongs to the application, not the
//! pipeline. The pipeline's only obligation is that every view component
//! the table references stays reachable through the composed aliases or an
//! entry point, which `RouteTable::verify` checks at composition time.

use serde::{Deserialize, Serialize};

use crate::compose::PipelineConfig;
use crate::error::{PipelineError, Result};

/// One record of the client-side navigation table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// URL path the router matches, e.g. `/`.
    pub url_path: String,
    /// Route name.
    pub name: String,
    /// Module reference of the view component, e.g. `@/components/WikiPage`.
    pub component: String,
}

/// Ordered list of route records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable(pub Vec<Route>);

impl RouteTable {
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that every component reference is reachable: either through a
    /// composed alias or relative to the entry module that imports it.
    /// Anything else, including a bare specifier no alias covers, is
    /// rejected.
    pub fn verify(&self, pipeline: &PipelineConfig) -> Result<()> {
        for route in &self.0 {
            if !component_reachable(&route.component, pipeline) {
                return Err(PipelineError::UnroutableComponent {
                    route: route.name.clone(),
                    component: route.component.clone(),
                });
            }
        }
        Ok(())
    }
}

fn component_reachable(component: &str, pipeline: &PipelineConfig) -> bool {
    // Relative references resolve against the importing entry module.
    if component.starts_with("./") || component.starts_with("../") {
        return true;
    }

    pipeline.aliases.keys().any(|alias| {
        // A `name$` alias matches only the exact specifier.
        if let Some(exact) = alias.strip_suffix('$') {
            component == exact
        } else {
            component == alias || component.starts_with(&format!("{alias}/"))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::manifest::DependencyManifest;
    use crate::resolver::ProjectRoot;
    use packline_config::{BuildEnvironment, ProjectOptions};

    fn pipeline() -> PipelineConfig {
        compose(
            BuildEnvironment::Development,
            &ProjectOptions::default(),
            &DependencyManifest::new(),
            &ProjectRoot::new("/project"),
        )
        .unwrap()
    }

    #[test]
    fn aliased_components_are_reachable() {
        let table = RouteTable(vec![Route {
            url_path: "/".to_string(),
            name: "home".to_string(),
            component: "@/components/WikiPage".to_string(),
        }]);
        assert!(table.verify(&pipeline()).is_ok());
    }

    #[test]
    fn exact_aliases_match_only_the_bare_specifier() {
        let table = RouteTable(vec![Route {
            url_path: "/".to_string(),
            name: "home".to_string(),
            component: "vue".to_string(),
        }]);
        assert!(table.verify(&pipeline()).is_ok());

        let table = RouteTable(vec![Route {
            url_path: "/".to_string(),
            name: "home".to_string(),
            component: "vue/dist/vue.js".to_string(),
        }]);
        assert!(table.verify(&pipeline()).is_err());
    }

    #[test]
    fn unreachable_components_are_reported_by_route_name() {
        let table = RouteTable(vec![Route {
            url_path: "/admin".to_string(),
            name: "admin".to_string(),
            component: "#missing/Admin".to_string(),
        }]);
        let result = table.verify(&pipeline());
        assert!(matches!(
            result.unwrap_err(),
            PipelineError::UnroutableComponent { route, .. } if route == "admin"
        ));
    }

    #[test]
    fn relative_components_resolve_against_their_entry() {
        let table = RouteTable(vec![Route {
            url_path: "/".to_string(),
            name: "home".to_string(),
            component: "./components/WikiPage".to_string(),
        }]);
        assert!(table.verify(&pipeline()).is_ok());
    }
}
