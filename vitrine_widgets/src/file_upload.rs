// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! File upload list.
//!
//! Chosen files are listed under `.file-upload-list`, one item per file name.
//! Single mode replaces the list; `data-multiple` appends, skipping names
//! already listed.

use vitrine_dom::{NodeId, markup};

use crate::event::{EventKind, FileInfo, WidgetEvent};
use crate::markers::{attr, class, flag};
use crate::runtime::Cx;

/// Human readable size: `512 B`, `1.5 KB`, `3.2 MB`, `1.0 GB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss, reason = "Display rounding only.")]
    let mut v = bytes as f64 / 1024.0;
    let mut unit = 0;
    while v >= 1024.0 && unit + 1 < UNITS.len() {
        v /= 1024.0;
        unit += 1;
    }
    format!("{v:.1} {}", UNITS[unit])
}

fn item_markup(file: &FileInfo) -> String {
    format!(
        r#"<li class="{item}" {name_attr}="{n}"><span class="file-upload-name">{t}</span><span class="file-upload-size">{s}</span><button class="{remove}" aria-label="Remove {n}">×</button></li>"#,
        item = class::FILE_UPLOAD_ITEM,
        remove = class::FILE_UPLOAD_REMOVE,
        name_attr = attr::FILE_NAME,
        n = markup::escape_attr(&file.name),
        t = markup::escape_text(&file.name),
        s = format_size(file.size),
    )
}

fn list_of(cx: &Cx<'_>, root: NodeId) -> Option<NodeId> {
    cx.doc
        .query_class(root, class::FILE_UPLOAD_LIST)
        .into_iter()
        .next()
}

/// Listed file names, in order.
pub fn file_names(doc: &vitrine_dom::Document, root: NodeId) -> Vec<String> {
    doc.query_class(root, class::FILE_UPLOAD_ITEM)
        .into_iter()
        .filter_map(|i| doc.attr(i, attr::FILE_NAME).map(str::to_owned))
        .collect()
}

fn refresh(cx: &mut Cx<'_>, root: NodeId) {
    let has = !file_names(cx.doc, root).is_empty();
    cx.doc.set_class(root, class::HAS_FILES, has);
}

/// The file input committed `files`.
pub(crate) fn change(cx: &mut Cx<'_>, input: NodeId, files: &[FileInfo]) {
    let Some(root) = cx.doc.closest_class(input, class::FILE_UPLOAD) else {
        return;
    };
    let Some(list) = list_of(cx, root) else {
        log::warn!("file upload {root:?} has no .{} element", class::FILE_UPLOAD_LIST);
        return;
    };
    let multiple = flag(cx.doc, root, attr::MULTIPLE);
    let chosen: &[FileInfo] = if multiple {
        files
    } else {
        &files[..files.len().min(1)]
    };
    if !multiple {
        cx.doc.clear_children(list);
    }
    let existing = file_names(cx.doc, root);
    let mut added = Vec::new();
    for file in chosen {
        if existing.contains(&file.name) || added.contains(&file.name) {
            continue;
        }
        if let Err(err) = cx.doc.append_markup(list, &item_markup(file)) {
            log::error!("file list markup rejected: {err}");
            continue;
        }
        added.push(file.name.clone());
    }
    refresh(cx, root);
    let names = file_names(cx.doc, root);
    cx.emit(
        WidgetEvent::new(EventKind::FileUploadChange, root)
            .with_value(names.join(","))
            .with_text(names.len().to_string()),
    );
}

/// A file item's remove button was activated.
pub(crate) fn remove(cx: &mut Cx<'_>, button: NodeId) {
    let Some(item) = cx.doc.closest_class(button, class::FILE_UPLOAD_ITEM) else {
        return;
    };
    let Some(root) = cx.doc.closest_class(item, class::FILE_UPLOAD) else {
        return;
    };
    let name = cx.doc.attr(item, attr::FILE_NAME).unwrap_or_default().to_owned();
    cx.doc.remove(item);
    refresh(cx, root);
    cx.emit(WidgetEvent::new(EventKind::FileUploadRemove, root).with_value(name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3072.0 GB");
    }
}
