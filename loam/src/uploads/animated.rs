// This file is part of the product Loam.
// SPDX-FileCopyrightText: 2025-2026 Loam Maintainers
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::io::Cursor;

/// True when the bytes are a GIF with more than one frame.
///
/// Re-encoding an animated GIF would keep only the first frame, so callers
/// copy such files verbatim. Undecodable bytes count as not animated; the
/// decode error surfaces later in the normal transcoding path.
pub fn is_animated_gif(bytes: &[u8]) -> bool {
    if !infer::image::is_gif(bytes) {
        return false;
    }
    let decoder = match GifDecoder::new(Cursor::new(bytes)) {
        Ok(decoder) => decoder,
        Err(_) => return false,
    };
    decoder.into_frames().take(2).count() > 1
}
