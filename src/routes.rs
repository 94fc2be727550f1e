#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Digest,
    Students,
    ContentPlanner,
    BulletinBoard,
    NotFound,
}

pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub route: Route,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem {
        path: "/",
        label: "Dashboard",
        route: Route::Digest,
    },
    NavItem {
        path: "/students",
        label: "Students",
        route: Route::Students,
    },
    NavItem {
        path: "/content-planner",
        label: "Content Planner",
        route: Route::ContentPlanner,
    },
    NavItem {
        path: "/bulletin-board",
        label: "Bulletin Board",
        route: Route::BulletinBoard,
    },
];

impl Route {
    /// Anything that is not one of the four pages falls through to `NotFound`.
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        NAV_ITEMS
            .iter()
            .find(|item| item.path == normalized)
            .map_or(Route::NotFound, |item| item.route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_pages() {
        assert_eq!(Route::resolve("/"), Route::Digest);
        assert_eq!(Route::resolve(""), Route::Digest);
        assert_eq!(Route::resolve("/students/"), Route::Students);
        assert_eq!(Route::resolve("content-planner"), Route::ContentPlanner);
        assert_eq!(Route::resolve("/bulletin-board"), Route::BulletinBoard);
    }

    #[test]
    fn unknown_paths_fall_back() {
        assert_eq!(Route::resolve("/settings"), Route::NotFound);
        assert_eq!(Route::resolve("/students/s1"), Route::NotFound);
    }
}
