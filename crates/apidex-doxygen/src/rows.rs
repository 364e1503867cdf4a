//! Mapping parsed search rows to declaration records.
//!
//! A row is `['<id>', ['<Name>', [<url>, <n>, '<scope text>'], ...]]`: one leaf name and
//! one link per declaration sharing it. The id is Doxygen's own bucket key and is ignored.

use apidex_index::{Declaration, SCOPE_SEPARATOR};

use crate::{category::Category, entities::decode_entities, parser::Literal};

/// Anchor used for links that point at a whole page.
pub const PAGE_TOP_ANCHOR: &str = "top";

/// A row whose shape is not `[id, [name, link...]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowError {
    /// Zero-based row index.
    pub(crate) row: usize,
    /// What was wrong.
    pub(crate) message: String,
}

impl RowError {
    /// Creates a row error.
    fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

/// Converts the top-level search data array into declarations, in file order.
pub(crate) fn read_rows(value: &Literal, category: Category) -> Result<Vec<Declaration>, RowError> {
    let rows = value
        .as_list()
        .ok_or_else(|| RowError::new(0, "search data is not an array"))?;

    let mut declarations = Vec::new();
    for (row, item) in rows.iter().enumerate() {
        let body = match item.as_list() {
            Some([_id, body]) => body,
            _ => return Err(RowError::new(row, "expected [id, [name, links...]]")),
        };
        let Some([name, links @ ..]) = body.as_list() else {
            return Err(RowError::new(row, "expected [name, links...]"));
        };
        let Some(name) = name.as_str() else {
            return Err(RowError::new(row, "name is not a string"));
        };
        let leaf = decode_entities(name);

        for link in links {
            let Some([url, rest @ ..]) = link.as_list() else {
                return Err(RowError::new(row, "link is not an array"));
            };
            let Some(url) = url.as_str() else {
                return Err(RowError::new(row, "link url is not a string"));
            };
            let scope_text = match rest.get(1) {
                Some(Literal::Str(text)) => decode_entities(text),
                Some(Literal::Null) | None => "".into(),
                Some(_) => return Err(RowError::new(row, "link scope is not a string")),
            };
            declarations.push(declaration(category, &leaf, url, &scope_text));
        }
    }

    Ok(declarations)
}

/// Builds one declaration from a decoded leaf, a link, and decoded scope text.
fn declaration(category: Category, leaf: &str, url: &str, scope_text: &str) -> Declaration {
    let (page_id, anchor) = split_url(url);
    let (head, signature) = split_signature(scope_text, leaf);

    let head_is_name = !signature.is_empty() || category.scope_names_declaration();
    let qualified_name = if head_is_name && names_leaf(head, leaf) {
        head.to_string()
    } else if head.is_empty() {
        leaf.to_string()
    } else {
        format!("{head}{SCOPE_SEPARATOR}{leaf}")
    };

    Declaration {
        qualified_name,
        kind: category.kind(page_id).as_str().to_string(),
        signature: signature.to_string(),
        page_id: page_id.to_string(),
        anchor: anchor.to_string(),
    }
}

/// Splits `../page.html#anchor` into page and anchor.
///
/// A link without a fragment targets the top of the page.
pub fn split_url(url: &str) -> (&str, &str) {
    let mut path = url;
    while let Some(rest) = path.strip_prefix("../").or_else(|| path.strip_prefix("./")) {
        path = rest;
    }
    match path.split_once('#') {
        Some((page, anchor)) if !anchor.is_empty() => (page, anchor),
        Some((page, _)) => (page, PAGE_TOP_ANCHOR),
        None => (path, PAGE_TOP_ANCHOR),
    }
}

/// Splits scope text into a name part and a parenthesized signature.
///
/// The split is made where `leaf(` starts a segment, so `operator()(int)` keeps its own
/// parentheses in the name. Without such a match the split is at the first `(`.
fn split_signature<'a>(text: &'a str, leaf: &str) -> (&'a str, &'a str) {
    if !text.contains('(') {
        return (text.trim(), "");
    }

    let at_leaf = text.match_indices(leaf).find_map(|(idx, _)| {
        let end = idx + leaf.len();
        let starts_segment = idx == 0 || text[..idx].ends_with(SCOPE_SEPARATOR);
        (starts_segment && text[end..].starts_with('(')).then_some(end)
    });
    let split = at_leaf.or_else(|| text.find('(')).unwrap_or(text.len());

    (text[..split].trim(), text[split..].trim())
}

/// Returns true if `head` is a qualified name whose last segment is `leaf`.
fn names_leaf(head: &str, leaf: &str) -> bool {
    head == leaf
        || head
            .strip_suffix(leaf)
            .is_some_and(|scope| scope.ends_with(SCOPE_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use apidex_index::SymbolKind;

    use super::*;
    use crate::parser::parse;

    fn decl(
        name: &str,
        kind: SymbolKind,
        signature: &str,
        page: &str,
        anchor: &str,
    ) -> Declaration {
        Declaration::new(name, kind, signature, page, anchor)
    }

    #[test]
    fn constructor_overloads() {
        let value = parse(
            "var searchData=[['icmplayer_3375',['IcmpLayer',\
             ['../classpcpp_1_1_icmp_layer.html#a66',1,'pcpp::IcmpLayer::IcmpLayer(uint8_t *data, size_t dataLen, Layer *prevLayer, Packet *packet)'],\
             ['../classpcpp_1_1_icmp_layer.html#a70',1,'pcpp::IcmpLayer::IcmpLayer()']]]];",
        )
        .unwrap();

        assert_eq!(
            read_rows(&value, Category::Functions).unwrap(),
            vec![
                decl(
                    "pcpp::IcmpLayer::IcmpLayer",
                    SymbolKind::Member,
                    "(uint8_t *data, size_t dataLen, Layer *prevLayer, Packet *packet)",
                    "classpcpp_1_1_icmp_layer.html",
                    "a66",
                ),
                decl(
                    "pcpp::IcmpLayer::IcmpLayer",
                    SymbolKind::Member,
                    "()",
                    "classpcpp_1_1_icmp_layer.html",
                    "a70",
                ),
            ]
        );
    }

    #[test]
    fn scope_only_function_rows() {
        let value = parse(
            "[['initdpdk_3385',['initDpdk',['../classpcpp_1_1_dpdk_device_list.html#a64',1,'pcpp::DpdkDeviceList']]],\
             ['in_5faddr2int_3381',['in_addr2int',['../namespacepcpp.html#a0e',1,'pcpp']]],\
             ['inet_5fntop_3382',['inet_ntop',['../_ip_utils_8h.html#a2a',1,'IpUtils.h']]]]",
        )
        .unwrap();

        assert_eq!(
            read_rows(&value, Category::Functions).unwrap(),
            vec![
                decl(
                    "pcpp::DpdkDeviceList::initDpdk",
                    SymbolKind::Member,
                    "",
                    "classpcpp_1_1_dpdk_device_list.html",
                    "a64",
                ),
                decl("pcpp::in_addr2int", SymbolKind::Function, "", "namespacepcpp.html", "a0e"),
                decl("IpUtils.h::inet_ntop", SymbolKind::Function, "", "_ip_utils_8h.html", "a2a"),
            ]
        );
    }

    #[test]
    fn decodes_entities_in_signatures() {
        let value = parse(
            "[['igmpv1layer_3377',['IgmpV1Layer',['../classpcpp_1_1_igmp_v1_layer.html#a69',1,\
             'pcpp::IgmpV1Layer::IgmpV1Layer(IgmpType type, const IPv4Address &amp;groupAddr=IPv4Address::Zero)']]]]",
        )
        .unwrap();
        let decls = read_rows(&value, Category::Functions).unwrap();
        assert_eq!(
            decls[0].signature,
            "(IgmpType type, const IPv4Address &groupAddr=IPv4Address::Zero)"
        );
        assert_eq!(decls[0].qualified_name, "pcpp::IgmpV1Layer::IgmpV1Layer");
    }

    #[test]
    fn class_rows_name_the_declaration() {
        let value = parse(
            "[['packet_1',['Packet',['../classpcpp_1_1_packet.html',1,'pcpp::Packet']]]]",
        )
        .unwrap();
        assert_eq!(
            read_rows(&value, Category::Classes).unwrap(),
            vec![decl("pcpp::Packet", SymbolKind::Type, "", "classpcpp_1_1_packet.html", "top")]
        );
    }

    #[test]
    fn null_or_missing_scope() {
        let value = parse("[['main_0',['main',['../main_8cpp.html#a1',null,''],['../b.html#a2',0]]]]")
            .unwrap();
        let names: Vec<String> = read_rows(&value, Category::Functions)
            .unwrap()
            .into_iter()
            .map(|d| d.qualified_name)
            .collect();
        assert_eq!(names, vec!["main", "main"]);
    }

    #[test]
    fn operator_call_keeps_its_parentheses() {
        assert_eq!(
            split_signature("pcpp::Hash::operator()(const Key &k) const", "operator()"),
            ("pcpp::Hash::operator()", "(const Key &k) const")
        );
        assert_eq!(
            split_signature("pcpp::getSize(int)", "size"),
            ("pcpp::getSize", "(int)")
        );
    }

    #[test]
    fn url_splitting() {
        assert_eq!(split_url("../classfoo.html#a12"), ("classfoo.html", "a12"));
        assert_eq!(split_url("../../x/classfoo.html#a12"), ("x/classfoo.html", "a12"));
        assert_eq!(split_url("classfoo.html"), ("classfoo.html", PAGE_TOP_ANCHOR));
        assert_eq!(split_url("classfoo.html#"), ("classfoo.html", PAGE_TOP_ANCHOR));
    }

    #[test]
    fn leaf_detection() {
        assert!(names_leaf("pcpp::Packet", "Packet"));
        assert!(names_leaf("Packet", "Packet"));
        assert!(!names_leaf("pcpp::RawPacket", "Packet"));
        assert!(!names_leaf("pcpp", "Packet"));
    }

    #[test]
    fn bad_shapes_are_reported_with_row() {
        let value = parse("[['a',['x',['u.html#1',1,'s']]], ['b']]").unwrap();
        let err = read_rows(&value, Category::Functions).unwrap_err();
        assert_eq!(err.row, 1);

        let value = parse("[['a',[7]]]").unwrap();
        assert!(read_rows(&value, Category::Functions).unwrap_err().message.contains("name"));

        let value = parse("'nope'").unwrap();
        assert!(read_rows(&value, Category::Functions).is_err());
    }
}
