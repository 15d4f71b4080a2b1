//! Built-in region → company → site catalog

use super::option::{CascadeOption, OptionTree};

fn site(name: &str) -> CascadeOption {
    CascadeOption::new(name, name)
}

fn company(name: &str, sites: &[&str]) -> CascadeOption {
    CascadeOption::new(name, name).with_children(sites.iter().map(|s| site(s)).collect())
}

/// Root options of the default sales region catalog.
///
/// Some sites are served by more than one company and therefore appear under several
/// parents.
pub fn default_regions() -> Vec<CascadeOption> {
    vec![
        CascadeOption::new("华北", "华北地区").with_children(vec![
            company("华北航空燃料有限公司", &["北京首都机场", "天津滨海机场"]),
            company("中航油北京分公司", &["北京首都机场", "北京大兴机场"]),
        ]),
        CascadeOption::new("华东", "华东地区").with_children(vec![
            company(
                "华东航空燃料有限公司",
                &["上海浦东机场", "上海虹桥机场", "杭州萧山机场"],
            ),
            company("浦东航空油料有限公司", &["上海浦东机场"]),
        ]),
        CascadeOption::new("华南", "华南地区").with_children(vec![company(
            "华南蓝天航空油料有限公司",
            &["广州白云机场", "深圳宝安机场"],
        )]),
        CascadeOption::new("西南", "西南地区").with_children(vec![company(
            "西南航空油料有限公司",
            &["成都双流机场", "重庆江北机场"],
        )]),
    ]
}

/// The default catalog as a validated tree
pub fn default_option_tree() -> OptionTree {
    OptionTree::new(default_regions()).unwrap_or_else(|e| {
        unreachable!("built-in region catalog is invalid: {}", e)
    })
}
