use std::sync::Arc;

use axum::response::Html;
use tera::{Context, Tera};

/// Compiled page templates. Names end in `.html` so tera autoescapes them.
#[derive(Clone)]
pub struct Templates {
    tera: Arc<Tera>,
}

impl Templates {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("../templates/layout.html")),
            ("login.html", include_str!("../templates/login.html")),
            ("register.html", include_str!("../templates/register.html")),
            ("dashboard.html", include_str!("../templates/dashboard.html")),
            ("task.html", include_str!("../templates/task.html")),
        ])?;

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<Html<String>, tera::Error> {
        self.tera.render(name, context).map(Html)
    }
}
