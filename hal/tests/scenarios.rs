//! End-to-end transformations of small object graphs

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

mod common;

use std::collections::BTreeMap;

use hal_transform::{
    Error, HalConfig, HalContract, HalProfile, KeyNaming, LinkData, Repository,
    RepositoryBuilder, Result, RouteTable, TransformationMap, Walker,
};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

const WIDGET_ID: &str = "11111111-1111-1111-1111-111111111111";

#[derive(Serialize, HalContract)]
#[serde(rename_all = "PascalCase")]
struct Widget {
    id:   Uuid,
    name: String,
}

#[derive(Serialize, HalContract)]
#[serde(transparent)]
#[hal(elements = "widgets")]
struct WidgetList {
    widgets: Vec<Widget>,
}

#[derive(Serialize, HalContract)]
struct Catalogue {
    title:    String,
    featured: Widget,
    stock:    BTreeMap<String, u32>,
    tags:     Vec<String>,
}

fn widget(name: &str) -> Widget {
    Widget {
        id:   Uuid::parse_str(WIDGET_ID).expect("valid uuid"),
        name: name.to_string(),
    }
}

fn routes() -> RouteTable {
    RouteTable::new().with_route("widget", "/widgets/{id}")
}

fn widget_map() -> TransformationMap<Widget> {
    TransformationMap::new(|w: &Widget| {
        Some(LinkData::endpointed("widget", json!({ "id": w.id })))
    })
}

struct WidgetProfile;

impl HalProfile for WidgetProfile {
    fn register(&self, builder: RepositoryBuilder) -> Result<RepositoryBuilder> {
        builder.register(widget_map())
    }
}

#[test]
fn test_self_link_through_route() {
    common::init_tracing();
    let repository = Repository::builder().profile(&WidgetProfile).unwrap().build();
    let routes = routes();
    let walker = Walker::new(&repository, &routes);

    let document = walker.transform(&widget("gear")).unwrap();

    assert_eq!(
        document,
        json!({
            "Id": WIDGET_ID,
            "Name": "gear",
            "_links": { "self": { "href": format!("/widgets/{WIDGET_ID}") } }
        })
    );
}

#[test]
fn test_embedded_member_replaces_source() {
    common::init_tracing();
    let repository = Repository::builder()
        .register(
            widget_map()
                .embed("parent", "w => w.name", |_| Some(LinkData::constant("urn:x")))
                .unwrap(),
        )
        .unwrap()
        .build();
    let routes = routes();
    let walker = Walker::new(&repository, &routes);

    let document = walker.transform(&widget("gear")).unwrap();

    assert_eq!(
        document,
        json!({
            "Id": WIDGET_ID,
            "_links": {
                "self": { "href": format!("/widgets/{WIDGET_ID}") },
                "parent": { "href": "urn:x" }
            },
            "_embedded": { "parent": "gear" }
        })
    );
}

#[test]
fn test_collection_is_wrapped() {
    common::init_tracing();
    let list = WidgetList {
        widgets: vec![widget("gear"), widget("cog")],
    };

    let unregistered_items = Repository::builder()
        .register(TransformationMap::new(|_: &WidgetList| {
            Some(LinkData::constant("/widgets"))
        }))
        .unwrap()
        .build();
    let document = Walker::new(&unregistered_items, &routes())
        .transform(&list)
        .unwrap();
    assert_eq!(
        document,
        json!({
            "_links": { "self": { "href": "/widgets" } },
            "_embedded": {
                "self": [
                    { "Id": WIDGET_ID, "Name": "gear" },
                    { "Id": WIDGET_ID, "Name": "cog" }
                ]
            }
        })
    );

    let registered_items = Repository::builder()
        .register(TransformationMap::new(|_: &WidgetList| {
            Some(LinkData::constant("/widgets"))
        }))
        .unwrap()
        .register(widget_map())
        .unwrap()
        .build();
    let document = Walker::new(&registered_items, &routes())
        .transform(&list)
        .unwrap();
    let self_link = json!({ "self": { "href": format!("/widgets/{WIDGET_ID}") } });
    assert_eq!(document["_embedded"]["self"][0]["_links"], self_link);
    assert_eq!(document["_embedded"]["self"][1]["_links"], self_link);
    assert_eq!(document["_embedded"]["self"][1]["Name"], "cog");
}

#[test]
fn test_unregistered_subtrees_pass_through() {
    common::init_tracing();
    let catalogue = Catalogue {
        title:    "spring".to_string(),
        featured: widget("gear"),
        stock:    BTreeMap::from([("gear box".to_string(), 3), ("cog".to_string(), 0)]),
        tags:     vec!["new".to_string()],
    };
    let plain = serde_json::to_value(&catalogue).unwrap();

    let empty = Repository::builder().build();
    assert_eq!(
        Walker::new(&empty, &routes()).transform(&catalogue).unwrap(),
        plain
    );

    let widgets_only = Repository::builder().register(widget_map()).unwrap().build();
    let document = Walker::new(&widgets_only, &routes())
        .transform(&catalogue)
        .unwrap();
    assert_eq!(document, plain);
}

#[test]
fn test_registered_parent_reaches_registered_children() {
    common::init_tracing();
    let catalogue = Catalogue {
        title:    "spring".to_string(),
        featured: widget("gear"),
        stock:    BTreeMap::new(),
        tags:     Vec::new(),
    };
    let repository = Repository::builder()
        .register(widget_map())
        .unwrap()
        .register(
            TransformationMap::new(|_: &Catalogue| Some(LinkData::constant("/catalogue")))
                .ignore(["tags", "|c| c.stock"])
                .unwrap(),
        )
        .unwrap()
        .build();

    let document = Walker::new(&repository, &routes())
        .transform(&catalogue)
        .unwrap();

    assert_eq!(
        document,
        json!({
            "title": "spring",
            "featured": {
                "Id": WIDGET_ID,
                "Name": "gear",
                "_links": { "self": { "href": format!("/widgets/{WIDGET_ID}") } }
            },
            "_links": { "self": { "href": "/catalogue" } }
        })
    );
}

#[test]
fn test_malformed_selectors_fail_registration() {
    for selector in ["x => Transform(x.Foo)", "x => x.Foo.Bar"] {
        let report = widget_map()
            .embed("parent", selector, |_| None)
            .err()
            .expect("selector should be rejected");
        assert!(matches!(
            report.current_context(),
            Error::MalformedSelector { .. }
        ));
        assert!(widget_map().hoist(selector).is_err());
        assert!(widget_map().ignore([selector]).is_err());
    }

    assert!(widget_map().embed("parent", "x => x.Foo", |_| None).is_ok());
}

#[test]
fn test_configured_routes_and_key_naming() {
    common::init_tracing();
    let config = HalConfig::from_json_str(
        r#"{ "dictionary_key_naming": "as_is", "routes": { "widget": "/w/{id}" } }"#,
    )
    .unwrap();
    assert_eq!(config.dictionary_key_naming, KeyNaming::AsIs);

    let routes = RouteTable::from_config(&config);
    let repository = Repository::builder()
        .config(config)
        .register(widget_map())
        .unwrap()
        .build();

    let document = Walker::new(&repository, &routes)
        .to_string(&widget("gear"))
        .unwrap();
    let document: Value = serde_json::from_str(&document).unwrap();
    assert_eq!(document["_links"]["self"]["href"], format!("/w/{WIDGET_ID}"));
}
