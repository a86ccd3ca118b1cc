use std::collections::{BTreeMap, HashMap};

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_deparam::{Config, Value};

#[derive(Debug, PartialEq, Deserialize)]
struct Address {
    city: String,
    postcode: String,
}

#[derive(Debug, PartialEq, Deserialize)]
struct QueryParams {
    id: u8,
    name: String,
    address: Address,
    phone: u32,
    user_ids: Vec<u8>,
}

#[test]
fn deserialize_struct() {
    let params: QueryParams = serde_deparam::from_str(
        "name=Acme&id=42&phone=12345&address[postcode]=12345&\
         address[city]=Carrot+City&user_ids[]=1&user_ids[]=2&user_ids[]=3",
    )
    .unwrap();
    assert_eq!(
        params,
        QueryParams {
            id: 42,
            name: "Acme".to_owned(),
            address: Address {
                city: "Carrot City".to_owned(),
                postcode: "12345".to_owned(),
            },
            phone: 12345,
            user_ids: vec![1, 2, 3],
        }
    );
}

#[test]
fn deserialize_repeated_flat_keys() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        id: Vec<u64>,
    }

    let q: Query = serde_deparam::from_str("id=1&id=2&id=3").unwrap();
    assert_eq!(q, Query { id: vec![1, 2, 3] });

    // a single value still fills a sequence
    let q: Query = serde_deparam::from_str("id=7").unwrap();
    assert_eq!(q, Query { id: vec![7] });
}

#[test]
fn deserialize_coerced() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        active: bool,
        ratio: f64,
        count: i32,
        label: String,
        missing: Option<String>,
        nothing: Option<u8>,
    }

    let q: Query = Config::new()
        .coerce(true)
        .deserialize_str("active=true&ratio=0.25&count=-3&label=abc&missing&nothing=null")
        .unwrap();
    assert_eq!(
        q,
        Query {
            active: true,
            ratio: 0.25,
            count: -3,
            label: "abc".to_owned(),
            missing: None,
            nothing: None,
        }
    );
}

#[test]
fn deserialize_options() {
    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        empty: Option<String>,
        present: Option<u16>,
        #[serde(default)]
        absent: Option<u16>,
    }

    let q: Query = serde_deparam::from_str("empty=&present=8").unwrap();
    assert_eq!(
        q,
        Query {
            empty: None,
            present: Some(8),
            absent: None,
        }
    );
}

#[test]
fn deserialize_maps_with_parsed_keys() {
    let map: HashMap<u32, String> = serde_deparam::from_str("1=one&20=twenty").unwrap();
    assert_eq!(map.get(&1).map(String::as_str), Some("one"));
    assert_eq!(map.get(&20).map(String::as_str), Some("twenty"));

    let nested: BTreeMap<String, BTreeMap<String, String>> =
        serde_deparam::from_str("a[x]=1&a[y]=2&b[z]=3").unwrap();
    assert_eq!(nested["a"]["y"], "2");
    assert_eq!(nested["b"]["z"], "3");
}

#[test]
fn deserialize_enums() {
    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Sort {
        Asc,
        Desc,
    }

    #[derive(Debug, PartialEq, Deserialize)]
    enum Filter {
        Range { min: u32, max: u32 },
        Exact(String),
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Query {
        sort: Sort,
        filter: Filter,
        other: Filter,
    }

    let q: Query = serde_deparam::from_str(
        "sort=desc&filter[Range][min]=1&filter[Range][max]=9&other[Exact]=abc",
    )
    .unwrap();
    assert_eq!(
        q,
        Query {
            sort: Sort::Desc,
            filter: Filter::Range { min: 1, max: 9 },
            other: Filter::Exact("abc".to_owned()),
        }
    );

    let err = serde_deparam::from_str::<Query>("sort=sideways&filter[Exact]=a&other[Exact]=b")
        .unwrap_err();
    assert!(err.to_string().contains("sideways"), "got: {err}");
}

#[test]
fn deserialize_type_errors() {
    #[derive(Debug, Deserialize)]
    struct Query {
        #[allow(dead_code)]
        age: u8,
    }

    let err = serde_deparam::from_str::<Query>("age=old").unwrap_err();
    assert!(matches!(err, serde_deparam::Error::Custom(_)), "got: {err}");

    let err = serde_deparam::from_str::<Query>("age=300").unwrap_err();
    assert!(matches!(err, serde_deparam::Error::Custom(_)), "got: {err}");
}

#[test]
fn deserialize_from_value() {
    let tree = serde_deparam::deparam("xs[]=1&xs[]=2", true).unwrap();
    let xs: Vec<u8> = serde_deparam::from_value(tree["xs"].clone()).unwrap();
    assert_eq!(xs, vec![1, 2]);

    let value: serde_json::Value =
        serde_deparam::from_value(Value::Mapping(tree)).unwrap();
    assert_eq!(value, serde_json::json!({"xs": [1, 2]}));
}
