//! Service configuration, read from the environment.
//!
//! | Variable              | Meaning                                   | Default                    |
//! |-----------------------|-------------------------------------------|----------------------------|
//! | `BRANCH`              | deployment branch, `prod` in production   | unset (offline)            |
//! | `BUCKET`              | certificate bucket suffix                 | `local`                    |
//! | `PLATE_GEN_FUNCTION`  | document service function name            | `cvs-svc-doc-gen-receiver` |
//! | `LAMBDA_ENDPOINT`     | invocation API base URL                   | `http://localhost:3002`    |
//! | `INVOKE_TIMEOUT_SECS` | invocation timeout                        | `30`                       |
//! | `S3_ENDPOINT`         | object store base URL                     | `http://localhost:7000`    |

use serde::{Deserialize, Serialize};

use plategen_domain::{Deployment, DocumentTemplate};
use plategen_io::{InvokeConfig, StoreConfig};

const DEFAULT_FUNCTION: &str = "cvs-svc-doc-gen-receiver";
const LOCAL_BRANCH: &str = "local";

/// Plate generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateGenConfig {
    /// Deployment branch name
    pub branch: Option<String>,
    /// Suffix of the certificate bucket name
    pub bucket_suffix: String,
    /// Document service function to invoke
    pub function_name: String,
    /// Template the document service renders
    pub template: DocumentTemplate,
    pub invoke: InvokeConfig,
    pub store: StoreConfig,
}

impl Default for PlateGenConfig {
    fn default() -> Self {
        PlateGenConfig {
            branch: std::env::var("BRANCH").ok(),
            bucket_suffix: std::env::var("BUCKET").unwrap_or_else(|_| LOCAL_BRANCH.to_string()),
            function_name: std::env::var("PLATE_GEN_FUNCTION")
                .unwrap_or_else(|_| DEFAULT_FUNCTION.to_string()),
            template: DocumentTemplate::default(),
            invoke: InvokeConfig::from_env(),
            store: StoreConfig::from_env(),
        }
    }
}

impl PlateGenConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Set the deployment branch; it also prefixes stored object keys.
    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self.store.key_prefix = Some(branch.to_string());
        self
    }

    pub fn with_bucket_suffix(mut self, suffix: &str) -> Self {
        self.bucket_suffix = suffix.to_string();
        self
    }

    pub fn with_function_name(mut self, name: &str) -> Self {
        self.function_name = name.to_string();
        self
    }

    pub fn deployment(&self) -> Deployment {
        Deployment::from_branch(self.branch.as_deref())
    }

    /// True when running outside any deployed environment.
    pub fn is_offline(&self) -> bool {
        matches!(self.branch.as_deref(), None | Some(LOCAL_BRANCH))
    }

    /// Name of the bucket certificates are stored in.
    pub fn bucket(&self) -> String {
        format!("cvs-cert-{}", self.bucket_suffix)
    }
}
