//! Tests for the `#[actions]` attribute.
#![cfg(feature = "macros")]

use modlink::{Component, Params, Router, actions, construct};

#[derive(Debug, Default)]
struct Profile {
    views: u32,
    name: Option<String>,
}

#[actions]
impl Profile {
    #[action]
    fn action_show(&mut self, params: &Params) -> Option<String> {
        self.views += 1;
        params.get("id").map(str::to_owned)
    }

    #[action(name = "action_views")]
    fn views(&self) -> u32 {
        self.views
    }

    #[action]
    fn action_rename(&mut self, params: &Params) -> Result<(), String> {
        let name = params.get("name").ok_or_else(|| "name required".to_string())?;
        self.name = Some(name.to_string());
        Ok(())
    }

    // Not an action.
    fn reset(&mut self) {
        self.views = 0;
    }
}

#[test]
fn test_generated_table_lists_marked_methods() {
    let table = Profile::actions();
    assert_eq!(
        table.names(),
        vec!["action_rename", "action_show", "action_views"]
    );
    assert!(!table.contains("reset"));
}

#[test]
fn test_generated_actions_run_through_router() {
    let router = Router::builder().register::<Profile>("Profile").build().unwrap();

    let shown = router.perform_action("app://Profile/show?id=7").unwrap();
    let shown = &shown.dispatched().unwrap().response;
    assert_eq!(shown.downcast_ref::<String>().map(String::as_str), Some("7"));

    let views = router
        .open_module("Profile", Some("action_views"), &Params::new())
        .unwrap();
    assert_eq!(views.response.downcast_ref::<u32>(), Some(&1));
}

#[test]
fn test_generated_action_error_is_returned() {
    let router = Router::builder().register::<Profile>("Profile").build().unwrap();

    let err = router
        .open_module("Profile", Some("action_rename"), &Params::new())
        .unwrap_err();
    assert!(matches!(err, modlink::RouterError::Action { .. }));

    router
        .open_module(
            "Profile",
            Some("action_rename"),
            &Params::from([("name", "ada")]),
        )
        .unwrap();
    let handle = router.registry().resolve("Profile").unwrap();
    let name = handle
        .with_as(|p: &mut Profile| {
            p.reset();
            p.name.clone()
        })
        .unwrap();
    assert_eq!(name, Some(Some("ada".to_string())));
}

#[test]
fn test_construct_uses_generated_table() {
    let component = construct::<Profile>();
    assert!(component.responds_to("action_show"));
    assert!(!component.responds_to("reset"));
}
