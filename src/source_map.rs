/***************************************************************************************************
 * Copyright (c) 2020-2023 Qualcomm Innovation Center, Inc. All rights reserved.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the “Software”), to deal in the Software without
 * restriction, including without limitation the rights to use, copy, modify, merge, publish,
 * distribute, sublicense, and/or sell copies of the Software, and to permit persons to whom the
 * Software is furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING
 * BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 **************************************************************************************************/
/***************************************************************************************************
 * plutus_cbor byte-accurate source map
 **************************************************************************************************/
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One node of a decoded item, as built up by [`crate::decode::parse_value`] during the single
/// parse pass shared with the ordinary decode path.
///
/// This tree is private to `decode.rs`; callers only ever see the flattened, path-addressed
/// [`SourceMapEntry`] list produced by [`flatten`].
pub(crate) struct RawNode {
    pub path: String,
    pub start: usize,
    pub end: usize,
    pub major_type: u8,
    pub type_label: &'static str,
    pub value_repr: String,
    pub children: Vec<RawNode>,
}

/// One entry of a source map: the byte span and structural identity of a single decoded item.
///
/// `path` addresses the item relative to the root using the notation `""` (root), `"[i]"` (array
/// index `i`), `".k"` (map entry under text key `k`), or `"[<repr>]"` (map entry under a
/// non-text key, rendered via [`Value::bounded_repr`]); a tag's wrapped value appends `.tag` to
/// its enclosing path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceMapEntry {
    pub path: String,
    pub start: usize,
    pub end: usize,
    pub major_type: u8,
    pub type_label: &'static str,
    pub value_repr: String,
    /// Paths of this entry's immediate children, in parse order.
    pub children: Vec<String>,
}

/// Flatten a [`RawNode`] tree into a pre-order [`SourceMapEntry`] list. The root is always
/// `entries[0]`.
pub(crate) fn flatten(root: RawNode) -> Vec<SourceMapEntry> {
    let mut out = Vec::new();
    push_node(root, &mut out);
    out
}

fn push_node(node: RawNode, out: &mut Vec<SourceMapEntry>) {
    let children: Vec<String> = node.children.iter().map(|c| c.path.clone()).collect();
    out.push(SourceMapEntry {
        path: node.path,
        start: node.start,
        end: node.end,
        major_type: node.major_type,
        type_label: node.type_label,
        value_repr: node.value_repr,
        children,
    });
    for child in node.children {
        push_node(child, out);
    }
}

/// Path of the `index`-th element of the array at `parent_path`.
pub(crate) fn array_child_path(parent_path: &str, index: usize) -> String {
    format!("{parent_path}[{index}]")
}

/// Path of the value keyed by `key` in the map at `parent_path`: `.k` for a text key, otherwise
/// `[<diagnostic repr of the key>]`.
pub(crate) fn map_child_path(parent_path: &str, key: &Value) -> String {
    match key {
        Value::Text { value, .. } => format!("{parent_path}.{value}"),
        other => format!("{parent_path}[{}]", other.bounded_repr(40)),
    }
}
