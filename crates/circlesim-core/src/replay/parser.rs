//! Parser for the .osr binary replay format.
//!
//! Fixed little-endian header, then a life-graph string, a timestamp
//! and an LZMA-compressed frame stream of `delta|x|y|keys` records.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tracing::debug;

use super::buffer::ReplayBuffer;
use super::frames::{classify, Keys, ReplayFrame};
use super::{LifePoint, Mods, Replay};
use crate::beatmap::GameMode;
use crate::error::{Error, Result};

pub(super) fn parse_path(path: &Path) -> Result<Replay> {
    let bytes = fs::read(path)
        .map_err(|_| Error::FileMissingOrEmpty(path.display().to_string()))?;
    if bytes.is_empty() {
        return Err(Error::FileMissingOrEmpty(path.display().to_string()));
    }
    parse_bytes(&bytes)
}

pub(super) fn parse_bytes(bytes: &[u8]) -> Result<Replay> {
    if bytes.is_empty() {
        return Err(Error::FileMissingOrEmpty("<bytes>".to_string()));
    }

    let mut buf = ReplayBuffer::new(bytes);

    let mode_byte = buf.read_u8()?;
    let mode = GameMode::from_u8(mode_byte)
        .ok_or_else(|| Error::ReplayDecode(format!("unknown play mode {mode_byte}")))?;
    let version = buf.read_u32()?;
    let beatmap_hash = buf.read_string()?;
    let player_name = buf.read_string()?;
    let replay_hash = buf.read_string()?;

    let count_300 = buf.read_u16()?;
    let count_100 = buf.read_u16()?;
    let count_50 = buf.read_u16()?;
    let count_geki = buf.read_u16()?;
    let count_katu = buf.read_u16()?;
    let count_miss = buf.read_u16()?;
    let score = buf.read_u32()?;
    let highest_combo = buf.read_u16()?;
    let perfect_combo = buf.read_u8()? == 1;
    let mods = Mods(buf.read_i32()?);

    let life_graph = buf.read_string()?;
    let life_points = parse_life_graph(life_graph.as_deref().unwrap_or(""));

    let timestamp_ticks = buf.read_i64()?;

    let (frames, actions) = match buf.read_byte_array()? {
        Some(blob) => decode_frames(blob)?,
        None => (Vec::new(), Vec::new()),
    };

    Ok(Replay {
        mode,
        version,
        beatmap_hash,
        player_name,
        replay_hash,
        count_300,
        count_100,
        count_50,
        count_geki,
        count_katu,
        count_miss,
        score,
        highest_combo,
        perfect_combo,
        mods,
        life_points,
        timestamp_ticks,
        frames,
        actions,
    })
}

// Format: time|life,time|life,...
fn parse_life_graph(raw: &str) -> Vec<LifePoint> {
    raw.split(',')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (time, life) = pair.split_once('|')?;
            Some(LifePoint {
                time: time.parse().ok()?,
                life: life.parse().ok()?,
            })
        })
        .collect()
}

/// Decompress the frame blob and decode `delta|x|y|keys` records into
/// absolute-time frames plus the key-change action subsequence.
fn decode_frames(blob: &[u8]) -> Result<(Vec<ReplayFrame>, Vec<ReplayFrame>)> {
    // Blob layout is the standalone LZMA container: 5-byte properties,
    // 8-byte uncompressed size, compressed payload.
    let mut decompressed = Vec::new();
    lzma_rs::lzma_decompress(&mut Cursor::new(blob), &mut decompressed)
        .map_err(|e| Error::ReplayDecode(format!("LZMA decompression failed: {e:?}")))?;
    let text = String::from_utf8(decompressed)
        .map_err(|e| Error::ReplayDecode(format!("frame stream is not UTF-8: {e}")))?;

    let mut frames: Vec<ReplayFrame> = Vec::new();
    let mut actions = Vec::new();
    let mut time = 0f32;
    let mut last_keys = Keys::NONE;

    for record in text.split(',').filter(|r| !r.is_empty()) {
        let Some(parsed) = parse_frame_record(record) else {
            debug!("skipping malformed replay frame record: {record}");
            continue;
        };
        let (delta, x, y, keys) = parsed;

        // Negative deltas (the trailing RNG-seed record among them)
        // are dropped entirely.
        if delta < 0.0 {
            continue;
        }

        // The first record's delta is sometimes a large garbage value;
        // discard it instead of accumulating. Compatibility shim, do
        // not generalize.
        if !frames.is_empty() {
            time += delta;
        }

        let frame = ReplayFrame {
            time,
            x,
            y,
            keys,
            action: classify(last_keys, keys),
        };

        if keys != last_keys {
            actions.push(frame);
        }
        last_keys = keys;
        frames.push(frame);
    }

    Ok((frames, actions))
}

fn parse_frame_record(record: &str) -> Option<(f32, f32, f32, Keys)> {
    let mut fields = record.split('|');
    let delta: f32 = fields.next()?.parse().ok()?;
    let x: f32 = fields.next()?.parse().ok()?;
    let y: f32 = fields.next()?.parse().ok()?;
    let keys = Keys(fields.next()?.parse::<i16>().ok()? as u16);
    Some((delta, x, y, keys))
}
