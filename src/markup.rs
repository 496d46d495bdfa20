/*! Selector-driven markup queries.

Selectors are whitespace-separated class lists: an element matches a selector
when its `class` attribute holds every listed class (in any order, possibly with others).

```
use readme_corpus::markup::Markup;

let markup = Markup::parse(r#"<div class="a b"><span class="lang">Rust</span></div>"#);
let blocks = markup.find_all("b a");
assert_eq!(blocks.len(), 1);
assert_eq!(blocks[0].find_all("lang")[0].text(), "Rust");
```
!*/
use select::document::Document;
use select::node::Node;
use select::predicate::Predicate;

/// Class-list selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classes(Vec<String>);

impl Classes {
    pub fn parse(selector: &str) -> Self {
        Self(selector.split_whitespace().map(String::from).collect())
    }
}

impl Predicate for Classes {
    fn matches(&self, node: &Node) -> bool {
        match node.attr("class") {
            Some(classes) if !self.0.is_empty() => {
                let present: Vec<&str> = classes.split_whitespace().collect();
                self.0.iter().all(|class| present.contains(&class.as_str()))
            }
            _ => false,
        }
    }
}

/// Parsed markup.
pub struct Markup {
    document: Document,
}

impl Markup {
    /// Parsing is lenient: malformed markup still yields a (possibly empty) tree.
    pub fn parse(raw: &str) -> Self {
        Self {
            document: Document::from(raw),
        }
    }

    /// Elements matching `selector`, in document order.
    pub fn find_all(&self, selector: &str) -> Vec<Element<'_>> {
        self.document
            .find(Classes::parse(selector))
            .map(|node| Element { node })
            .collect()
    }
}

/// An element of a [Markup] tree.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    node: Node<'a>,
}

impl<'a> Element<'a> {
    /// Descendants matching `selector`, in document order.
    pub fn find_all(&self, selector: &str) -> Vec<Element<'a>> {
        self.node
            .find(Classes::parse(selector))
            .map(|node| Element { node })
            .collect()
    }

    /// Concatenated text of the element and its descendants.
    pub fn text(&self) -> String {
        self.node.text()
    }
}

#[cfg(test)]
mod tests {
    use super::Markup;

    const PAGE: &str = r#"
<html><body>
  <a class="v-align-middle nav">header</a>
  <div class="repository-content">
    <span class="lang">Jupyter Notebook</span>
    <span class="lang">Python</span>
    <article class="p-5 entry-content markdown-body">
      <h1>Title</h1>
      <p>Some text.</p>
    </article>
  </div>
</body></html>"#;

    #[test]
    fn classes_match_in_any_order() {
        let m = Markup::parse(PAGE);
        assert_eq!(m.find_all("markdown-body entry-content p-5").len(), 1);
        assert_eq!(m.find_all("v-align-middle").len(), 1);
    }

    #[test]
    fn all_classes_are_required() {
        let m = Markup::parse(PAGE);
        assert!(m.find_all("markdown-body missing").is_empty());
        assert!(m.find_all("").is_empty());
    }

    #[test]
    fn scoped_search_and_text() {
        let m = Markup::parse(PAGE);
        let block = m.find_all("repository-content")[0];
        let langs: Vec<String> = block.find_all("lang").iter().map(|e| e.text()).collect();
        assert_eq!(langs, vec!["Jupyter Notebook", "Python"]);
    }

    #[test]
    fn garbage_markup() {
        let m = Markup::parse("<<<not html>");
        assert!(m.find_all("lang").is_empty());
    }
}
