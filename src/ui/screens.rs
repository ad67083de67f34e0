use crate::db::SearchField;
use crate::models::Course;

/// Roles offered on the login screen. Selection is trust-based; there are no
/// credentials behind it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Role {
    Administrator,
    Student,
}

impl Role {
    pub(crate) const ALL: [Role; 2] = [Role::Administrator, Role::Student];

    pub(crate) fn label(self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Student => "Student",
        }
    }
}

/// State for the role-selection screen.
#[derive(Default)]
pub(crate) struct LoginScreen {
    pub(crate) selected: usize,
}

impl LoginScreen {
    pub(crate) fn selected_role(&self) -> Role {
        Role::ALL[self.selected.min(Role::ALL.len() - 1)]
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let len = Role::ALL.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}

/// The search filter currently applied to the admin table, kept around so
/// the banner can describe it and "clear" knows there is something to reset.
pub(crate) struct Filter {
    pub(crate) field: SearchField,
    pub(crate) pattern: String,
}

/// State for the administrator portal: the rows currently on screen (either
/// the full catalog or a search result) plus the table selection.
pub(crate) struct AdminScreen {
    pub(crate) courses: Vec<Course>,
    pub(crate) selected: usize,
    pub(crate) filter: Option<Filter>,
}

impl AdminScreen {
    pub(crate) fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            selected: 0,
            filter: None,
        }
    }

    /// Replace the table contents. Used both for the unfiltered listing
    /// (`filter` = None) and for search results.
    pub(crate) fn show(&mut self, courses: Vec<Course>, filter: Option<Filter>) {
        self.courses = courses;
        self.filter = filter;
        self.ensure_in_bounds();
    }

    pub(crate) fn current_course(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.courses.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.courses.len() as isize;
        self.selected = (self.selected as isize + delta).clamp(0, len - 1) as usize;
    }

    fn ensure_in_bounds(&mut self) {
        if self.courses.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.courses.len() {
            self.selected = self.courses.len() - 1;
        }
    }
}

/// State for the student portal. The table is read-only; the selection only
/// exists so long listings can be scrolled.
pub(crate) struct StudentScreen {
    pub(crate) courses: Vec<Course>,
    pub(crate) selected: usize,
}

impl StudentScreen {
    pub(crate) fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            selected: 0,
        }
    }

    pub(crate) fn show(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        if self.courses.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.courses.len() {
            self.selected = self.courses.len() - 1;
        }
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.courses.is_empty() {
            self.selected = 0;
            return;
        }
        let len = self.courses.len() as isize;
        self.selected = (self.selected as isize + delta).clamp(0, len - 1) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str) -> Course {
        Course {
            code: code.into(),
            name: format!("{code} name"),
            faculty: "Faculty".into(),
            fees: "100".into(),
        }
    }

    #[test]
    fn login_selection_wraps_around() {
        let mut login = LoginScreen::default();
        assert_eq!(login.selected_role(), Role::Administrator);
        login.move_selection(1);
        assert_eq!(login.selected_role(), Role::Student);
        login.move_selection(1);
        assert_eq!(login.selected_role(), Role::Administrator);
        login.move_selection(-1);
        assert_eq!(login.selected_role(), Role::Student);
    }

    #[test]
    fn admin_selection_clamps_and_survives_refiltering() {
        let mut admin = AdminScreen::new(vec![course("A"), course("B"), course("C")]);
        admin.move_selection(5);
        assert_eq!(admin.selected, 2);

        admin.show(vec![course("A")], None);
        assert_eq!(admin.selected, 0);
        assert_eq!(admin.current_course().map(|c| c.code.as_str()), Some("A"));

        admin.show(Vec::new(), None);
        assert!(admin.current_course().is_none());
        admin.move_selection(-1);
        assert_eq!(admin.selected, 0);
    }
}
