#![allow(dead_code)]

use modlink::{ActionTable, Component, Params, Router, testing::RecordingNotifier};

// ============================================================================
// Test Components
// ============================================================================

/// A shopping cart with a few local-only actions.
#[derive(Debug, Default)]
pub struct Cart {
    pub items: Vec<String>,
}

impl Component for Cart {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .action("action_add", |this: &mut Self, params: &Params| {
                let sku = params.get("sku").ok_or("missing sku")?;
                this.items.push(sku.to_string());
                Ok::<_, &str>(this.items.len())
            })
            .action("action_count", |this: &mut Self, _: &Params| this.items.len())
            .action("action_clear", |this: &mut Self, _: &Params| this.items.clear())
    }
}

/// A component with no actions at all.
#[derive(Debug, Default)]
pub struct Blank;

impl Component for Blank {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
    }
}

/// Cart updates sent between components.
#[derive(Clone, Debug, PartialEq)]
pub struct CartUpdated {
    pub items: usize,
}

// ============================================================================
// Fixtures
// ============================================================================

/// A router with `Cart` and `Blank` registered and a recording notifier.
pub fn shop_router() -> (Router, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let router = Router::builder()
        .register::<Cart>("Cart")
        .register::<Blank>("Blank")
        .notifier(notifier.clone())
        .build()
        .unwrap();
    (router, notifier)
}
