//! Host lifecycle hooks.
//!
//! Both hooks are infallible: structural absences (no `nav` list, no
//! `Knowledge Base` entry or section) leave the input untouched.

use kb_config::Config;
use kb_storage::{FsStorage, Storage};
use serde_yaml::{Mapping, Value};

use crate::builder::{KnowledgeBaseOptions, build_knowledge_base};
use crate::links::LinkTable;
use crate::navigation::{NavNode, Navigation};

/// Config-phase hook.
///
/// Scans `config.docs_dir` and splices the generated sections into the
/// configured navigation. The returned table must be passed to [`on_nav`].
pub fn on_config(config: &mut Config, options: &KnowledgeBaseOptions) -> LinkTable {
    let storage = FsStorage::new(config.docs_dir.clone());
    tracing::debug!(docs_dir = %storage.source_dir().display(), "Scanning knowledge base");
    apply_knowledge_base(&mut config.host, &storage, options)
}

/// Replace the knowledge base entry of `host["nav"]` with generated sections.
///
/// Returns an empty table without touching `host` when `nav` isn't a list.
/// Otherwise only the first top-level entry keyed by the section title is
/// replaced; the table is returned even when no such entry exists.
pub fn apply_knowledge_base(
    host: &mut Mapping,
    storage: &dyn Storage,
    options: &KnowledgeBaseOptions,
) -> LinkTable {
    let Some(Value::Sequence(nav)) = host.get_mut("nav") else {
        tracing::debug!("No navigation list configured, skipping knowledge base");
        return LinkTable::new();
    };

    let kb = build_knowledge_base(storage, options);

    let key = options.section_title.as_str();
    match nav
        .iter_mut()
        .find_map(|entry| entry.as_mapping_mut()?.get_mut(key))
    {
        Some(slot) => *slot = Value::Sequence(kb.nav),
        None => tracing::debug!(section = key, "Navigation entry not found"),
    }

    kb.links
}

/// Post-navigation hook.
///
/// Fills each child section of the knowledge base section with link nodes
/// from `links`, in table order. Children whose titles aren't in the table
/// are left as they are.
pub fn on_nav(nav: &mut Navigation, links: &LinkTable, options: &KnowledgeBaseOptions) {
    if links.is_empty() {
        return;
    }

    let Some(groups) = nav.section_mut(&options.section_title) else {
        tracing::debug!(section = %options.section_title, "Rendered section not found");
        return;
    };

    let mut filled = 0;
    for group in groups {
        if let NavNode::Section { title, children } = group
            && let Some(group_links) = links.get(title)
        {
            *children = group_links
                .iter()
                .map(|link| NavNode::link(&link.title, &link.url))
                .collect();
            filled += 1;
        }
    }
    tracing::debug!(filled, "Filled knowledge base sections");
}

#[cfg(test)]
mod tests {
    use kb_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::links::NavLink;

    fn host(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_file(
                "blog/posts/how-to/setup.md",
                "---\ntitle: Setup Guide\ndate: 2024-03-05\n---\nBody\n",
            )
            .with_file("blog/posts/how-to/notes.md", "# Loose Notes\n")
            .with_dir("blog/posts/data_platform")
    }

    #[test]
    fn test_apply_replaces_first_matching_entry() {
        let mut config = host(
            r"
nav:
  - Home: index.md
  - Knowledge Base: []
  - Knowledge Base: keep.md
",
        );

        let links = apply_knowledge_base(&mut config, &storage(), &KnowledgeBaseOptions::default());

        assert_eq!(
            config.get("nav").unwrap(),
            &yaml(
                r"
- Home: index.md
- Knowledge Base:
    - Overview: blog/index.md
    - Data platform: []
    - How to: []
- Knowledge Base: keep.md
"
            )
        );
        assert_eq!(links.titles().collect::<Vec<_>>(), vec!["Data platform", "How to"]);
        assert_eq!(
            links.get("How to").unwrap(),
            &[
                NavLink::new("Setup Guide", "blog/2024/03/05/setup-guide/"),
                NavLink::new("Loose Notes", "blog/drafts/loose-notes/"),
            ][..]
        );
    }

    #[test]
    fn test_apply_without_nav_list_is_noop() {
        let mut config = host("site_name: KB\nnav: index.md\n");
        let before = config.clone();

        let links = apply_knowledge_base(&mut config, &storage(), &KnowledgeBaseOptions::default());

        assert_eq!(config, before);
        assert!(links.is_empty());

        let mut config = host("site_name: KB\n");
        let links = apply_knowledge_base(&mut config, &storage(), &KnowledgeBaseOptions::default());
        assert!(config.get("nav").is_none());
        assert!(links.is_empty());
    }

    #[test]
    fn test_apply_without_entry_keeps_nav_and_returns_links() {
        let mut config = host("nav:\n  - Home: index.md\n  - about.md\n");
        let before = config.clone();

        let links = apply_knowledge_base(&mut config, &storage(), &KnowledgeBaseOptions::default());

        assert_eq!(config, before);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_apply_custom_section_title() {
        let mut config = host("nav:\n  - Docs: []\n");
        let options = KnowledgeBaseOptions {
            section_title: "Docs".to_owned(),
            ..KnowledgeBaseOptions::default()
        };

        apply_knowledge_base(&mut config, &storage(), &options);

        let nav = Navigation::from_config(config.get("nav"));
        assert_eq!(nav.items[0].title(), Some("Docs"));
        let NavNode::Section { children, .. } = &nav.items[0] else {
            panic!("expected section");
        };
        assert_eq!(children.len(), 3);
    }

    #[test]
    fn test_on_nav_fills_known_sections() {
        let mut links = LinkTable::new();
        links.insert(
            "How to",
            vec![
                NavLink::new("B", "blog/drafts/b/"),
                NavLink::new("A", "blog/2024/01/01/a/"),
            ],
        );
        let mut nav = Navigation {
            items: vec![
                NavNode::link("Home", "/"),
                NavNode::section(
                    "Knowledge Base",
                    vec![
                        NavNode::Page {
                            title: Some("Overview".to_owned()),
                            file: "blog/index.md".to_owned(),
                        },
                        NavNode::section("How to", vec![NavNode::link("stale", "x/")]),
                        NavNode::section("Unknown", vec![NavNode::link("kept", "y/")]),
                    ],
                ),
            ],
        };

        on_nav(&mut nav, &links, &KnowledgeBaseOptions::default());

        assert_eq!(
            nav.section_mut("Knowledge Base").unwrap(),
            &vec![
                NavNode::Page {
                    title: Some("Overview".to_owned()),
                    file: "blog/index.md".to_owned(),
                },
                NavNode::section(
                    "How to",
                    vec![
                        NavNode::link("B", "blog/drafts/b/"),
                        NavNode::link("A", "blog/2024/01/01/a/"),
                    ],
                ),
                NavNode::section("Unknown", vec![NavNode::link("kept", "y/")]),
            ]
        );
    }

    #[test]
    fn test_on_nav_empty_table_is_noop() {
        let mut nav = Navigation {
            items: vec![NavNode::section(
                "Knowledge Base",
                vec![NavNode::section("How to", vec![NavNode::link("stale", "x/")])],
            )],
        };
        let before = nav.clone();

        on_nav(&mut nav, &LinkTable::new(), &KnowledgeBaseOptions::default());

        assert_eq!(nav, before);
    }

    #[test]
    fn test_on_nav_missing_section_is_noop() {
        let mut links = LinkTable::new();
        links.insert("How to", vec![NavLink::new("A", "a/")]);
        let mut nav = Navigation {
            items: vec![NavNode::section("How to", Vec::new())],
        };
        let before = nav.clone();

        on_nav(&mut nav, &links, &KnowledgeBaseOptions::default());

        assert_eq!(nav, before);
    }

    #[test]
    fn test_on_nav_empty_group_clears_children() {
        let mut links = LinkTable::new();
        links.insert("Empty", Vec::new());
        let mut nav = Navigation {
            items: vec![NavNode::section(
                "Knowledge Base",
                vec![NavNode::section("Empty", vec![NavNode::link("stale", "x/")])],
            )],
        };

        on_nav(&mut nav, &links, &KnowledgeBaseOptions::default());

        assert_eq!(
            nav.items,
            vec![NavNode::section(
                "Knowledge Base",
                vec![NavNode::section("Empty", Vec::new())]
            )]
        );
    }

    #[test]
    fn test_hooks_end_to_end_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        let posts = docs.join("blog/posts/runbooks");
        std::fs::create_dir_all(&posts).unwrap();
        std::fs::write(
            posts.join("restart.md"),
            "---\ntitle: Restarting Services\ndate: 2023-11-20\n---\n",
        )
        .unwrap();

        let mut config = Config::from_mapping(
            host("nav:\n  - Home: index.md\n  - Knowledge Base: []\n"),
            dir.path(),
        )
        .unwrap();
        assert_eq!(config.docs_dir, dir.path().join("docs"));
        let options = KnowledgeBaseOptions::from_config(&config);

        let links = on_config(&mut config, &options);
        let mut nav = Navigation::from_config(config.host.get("nav"));
        on_nav(&mut nav, &links, &options);

        assert_eq!(
            nav.section_mut("Knowledge Base").unwrap()[1],
            NavNode::section(
                "Runbooks",
                vec![NavNode::link(
                    "Restarting Services",
                    "blog/2023/11/20/restarting-services/"
                )]
            )
        );
    }
}
