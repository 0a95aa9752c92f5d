use std::collections::BTreeSet;

use crate::model::Quote;

/// Rendering surface injected into the core. The core never touches a
/// display directly; anything user-visible goes through this trait.
pub trait Presenter {
    fn render_quote(&self, quote: &Quote);
    fn render_no_quotes(&self, category: &str);
    fn render_categories(&self, categories: &BTreeSet<String>);
    fn notify(&self, message: &str);
}

pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn render_quote(&self, quote: &Quote) {
        println!("\"{}\"", quote.text);
        println!("- {}", quote.category);
    }

    fn render_no_quotes(&self, category: &str) {
        if category == crate::store::ALL_CATEGORIES {
            println!("No quotes available.");
        } else {
            println!("No quotes available for this category.");
        }
    }

    fn render_categories(&self, categories: &BTreeSet<String>) {
        let mut line = String::from(crate::store::ALL_CATEGORIES);
        for c in categories {
            line.push_str(", ");
            line.push_str(c);
        }
        println!("categories: {}", line);
    }

    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}
