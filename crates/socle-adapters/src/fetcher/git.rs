//! Shallow git clone via libgit2.

use std::path::Path;

use git2::{AutotagOption, Cred, CredentialType, FetchOptions, RemoteCallbacks, build::RepoBuilder};
use tracing::{debug, info};
use url::Url;

use socle_core::{
    application::{ApplicationError, ports::TemplateFetcher},
    domain::TemplateSource,
    error::SocleResult,
};

/// Credential callbacks after which libgit2 is told to give up.
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Clones the default branch of a remote at the source's depth, without tags.
///
/// `file://` remotes go through libgit2's local transport, which cannot do
/// shallow fetches; those are cloned in full.
///
/// Public HTTPS remotes need no credentials. For SSH remotes the running
/// ssh-agent is asked for a key, and for authenticated HTTPS the user's git
/// credential helper is consulted.
#[derive(Debug, Clone, Default)]
pub struct GitFetcher;

impl GitFetcher {
    pub fn new() -> Self {
        Self
    }

    fn callbacks<'a>() -> RemoteCallbacks<'a> {
        let mut attempts = 0;
        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(move |url, username_from_url, allowed| {
            attempts += 1;
            if attempts > MAX_CREDENTIAL_ATTEMPTS {
                return Err(git2::Error::from_str("authentication failed"));
            }

            if allowed.contains(CredentialType::SSH_KEY) {
                Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
            } else if allowed.contains(CredentialType::USER_PASS_PLAINTEXT) {
                let config = git2::Config::open_default()?;
                Cred::credential_helper(&config, url, username_from_url)
            } else {
                Cred::default()
            }
        });
        callbacks
    }

    fn is_local_transport(url: &str) -> bool {
        Url::parse(url).is_ok_and(|u| u.scheme() == "file")
    }
}

impl TemplateFetcher for GitFetcher {
    fn fetch(&self, source: &TemplateSource, destination: &Path) -> SocleResult<()> {
        info!(url = source.url(), depth = source.depth(), "Cloning template");

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(Self::callbacks());
        fetch_options.download_tags(AutotagOption::None);
        if Self::is_local_transport(source.url()) {
            debug!("Local transport, cloning full history");
        } else {
            fetch_options.depth(i32::try_from(source.depth()).unwrap_or(i32::MAX));
        }

        let mut builder = RepoBuilder::new();
        builder.fetch_options(fetch_options);

        let repo = builder
            .clone(source.url(), destination)
            .map_err(|e| ApplicationError::Fetch {
                url: source.url().to_string(),
                reason: e.message().to_string(),
            })?;

        if let Some(head) = repo.head().ok().and_then(|h| h.target()) {
            debug!(head = %head, "Template cloned");
        }

        Ok(())
    }
}
