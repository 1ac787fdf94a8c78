//! Site configuration: the pages the host can load, with built-in defaults.

use crate::core::ElementId;
use crate::core::form::{
    CONTACT_FORM_ID, FormSpec, SUPPORT_FORM_ID, contact_form, support_ticket_form,
};
use crate::core::page::{HOME_PAGE, LinkSpec, PageSpec, SectionSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no page named `{0}`")]
    UnknownPage(String),
    #[error("no form named `{0}`")]
    UnknownForm(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub pages: Vec<PageSpec>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SiteConfig {
    /// The three NetSaviors pages: home, contact and support.
    pub fn builtin() -> Self {
        Self {
            pages: vec![home_page(), contact_page(), support_page()],
        }
    }

    /// Reads a config file. `.json` files are parsed as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        debug!(path = %path.display(), "loaded site config");
        Ok(config)
    }

    /// Page by file name, with or without `.html`. An empty name means home.
    pub fn page(&self, name: &str) -> Result<&PageSpec, ConfigError> {
        let name = if name.is_empty() { HOME_PAGE } else { name };
        let name = if name == "index" { HOME_PAGE } else { name };
        self.pages
            .iter()
            .find(|page| page.matches(name))
            .ok_or_else(|| ConfigError::UnknownPage(name.to_string()))
    }

    /// Form by id, or by the short names `contact` and `support`.
    pub fn form(&self, name: &str) -> Result<&FormSpec, ConfigError> {
        let id = match name {
            "contact" => CONTACT_FORM_ID,
            "support" => SUPPORT_FORM_ID,
            other => other,
        };
        self.pages
            .iter()
            .flat_map(|page| page.forms.iter())
            .find(|form| form.id == id)
            .ok_or_else(|| ConfigError::UnknownForm(name.to_string()))
    }

    pub fn forms(&self) -> impl Iterator<Item = &FormSpec> {
        self.pages.iter().flat_map(|page| page.forms.iter())
    }
}

fn nav() -> Vec<LinkSpec> {
    vec![
        LinkSpec::new("index.html", "Home"),
        LinkSpec::new("contact.html", "Contact"),
        LinkSpec::new("support.html", "Support"),
    ]
}

fn section(id: &str, title: &str, body: &str) -> SectionSpec {
    SectionSpec {
        id: ElementId::new(id),
        title: title.to_string(),
        body: body.to_string(),
        links: Vec::new(),
    }
}

fn home_page() -> PageSpec {
    let mut hero = section(
        "hero",
        "Reliable IT for growing businesses",
        "NetSaviors Technology keeps your network, devices and people connected.",
    );
    hero.links = vec![
        LinkSpec::new("#services", "Our services"),
        LinkSpec::new("#about", "About us"),
    ];
    PageSpec {
        path: HOME_PAGE.to_string(),
        title: "Home".to_string(),
        nav: nav(),
        sections: vec![
            hero,
            section(
                "services",
                "Services",
                "Network design and installation, managed security, cloud migration \
                 and a help desk that answers the phone.",
            ),
            section(
                "about",
                "About",
                "A small team of engineers serving local offices since 2012.",
            ),
        ],
        forms: Vec::new(),
    }
}

fn contact_page() -> PageSpec {
    let mut info = section(
        "contact-info",
        "Get in touch",
        "Tell us what you need and we will reply within one business day.",
    );
    info.links = vec![LinkSpec::new("#contactForm", "Jump to the form")];
    PageSpec {
        path: "contact.html".to_string(),
        title: "Contact".to_string(),
        nav: nav(),
        sections: vec![info],
        forms: vec![contact_form()],
    }
}

fn support_page() -> PageSpec {
    let mut intro = section(
        "support-intro",
        "Support desk",
        "Log an incident for the support team. Critical issues are picked up first.",
    );
    intro.links = vec![
        LinkSpec::new("#supportLogForm", "Log a ticket"),
        LinkSpec::new("#hours", "Support hours"),
    ];
    PageSpec {
        path: "support.html".to_string(),
        title: "Support".to_string(),
        nav: nav(),
        sections: vec![
            intro,
            section(
                "hours",
                "Hours",
                "Monday to Friday 8:00 to 18:00. P1 incidents are handled around the clock.",
            ),
        ],
        forms: vec![support_ticket_form()],
    }
}
