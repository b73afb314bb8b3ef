//! URL <-> section mapping. Any path the server might hand us resolves to a
//! section; unknown paths degrade instead of erroring.

use crate::projects;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    About,
    Portfolio,
    Socials,
}

impl Section {
    pub fn path(self) -> &'static str {
        match self {
            Section::About => "/about",
            Section::Portfolio => "/portfolio",
            Section::Socials => "/socials",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::About => "Author",
            Section::Portfolio => "Portfolio",
            Section::Socials => "Socials",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub section: Section,
    /// Project overlay open on top of the portfolio section.
    pub project: Option<&'static str>,
}

impl Route {
    pub fn section(section: Section) -> Route {
        Route {
            section,
            project: None,
        }
    }

    /// Canonical path for this route, used to rewrite the address bar after
    /// resolving a messy or unknown URL.
    pub fn path(self) -> String {
        match self.project {
            Some(id) => format!("/portfolio/{id}"),
            None => self.section.path().to_string(),
        }
    }
}

/// Resolves a browser path to a route. Trailing slashes and letter case are
/// ignored; a `/portfolio/<id>` with an unknown id falls back to the bare
/// portfolio, and anything unrecognized lands on the about section.
pub fn resolve(path: &str) -> Route {
    let clean = path.trim_end_matches('/').to_ascii_lowercase();

    match clean.as_str() {
        "" | "/about" => Route::section(Section::About),
        "/portfolio" => Route::section(Section::Portfolio),
        rest if rest == "/socials" || rest.starts_with("/socials/") => {
            Route::section(Section::Socials)
        }
        rest if rest.starts_with("/portfolio/") => {
            let mut parts = rest.splitn(4, '/').skip(2);
            let id = parts.next().unwrap_or_default();
            let project = if parts.next().is_none() {
                projects::find(id).map(|p| p.id)
            } else {
                None
            };
            Route {
                section: Section::Portfolio,
                project,
            }
        }
        _ => Route::section(Section::About),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_about_resolve_to_about() {
        assert_eq!(resolve(""), Route::section(Section::About));
        assert_eq!(resolve("/"), Route::section(Section::About));
        assert_eq!(resolve("/about"), Route::section(Section::About));
        assert_eq!(resolve("/about///"), Route::section(Section::About));
    }

    #[test]
    fn known_project_round_trips() {
        let route = resolve("/portfolio/vehicletools");
        assert_eq!(route.section, Section::Portfolio);
        assert_eq!(route.project, Some("vehicletools"));
        assert_eq!(route.path(), "/portfolio/vehicletools");
        assert_eq!(resolve(&route.path()), route);
    }

    #[test]
    fn unknown_project_degrades_to_portfolio() {
        let route = resolve("/portfolio/doesnotexist");
        assert_eq!(route, Route::section(Section::Portfolio));
        assert_eq!(route.path(), "/portfolio");
    }

    #[test]
    fn extra_segments_degrade_to_portfolio() {
        assert_eq!(
            resolve("/portfolio/vehicletools/extra"),
            Route::section(Section::Portfolio)
        );
    }

    #[test]
    fn case_and_trailing_slashes_are_normalized() {
        assert_eq!(
            resolve("/Portfolio/VehicleTools/"),
            Route {
                section: Section::Portfolio,
                project: Some("vehicletools"),
            }
        );
        assert_eq!(resolve("/SOCIALS"), Route::section(Section::Socials));
        assert_eq!(resolve("/socials/anything"), Route::section(Section::Socials));
    }

    #[test]
    fn garbage_lands_on_about() {
        assert_eq!(resolve("/blog"), Route::section(Section::About));
        assert_eq!(resolve("/portfolio2"), Route::section(Section::About));
    }
}
