//! Binary snapshot of an explorer.
//!
//! Format:
//! - Header (32 bytes):
//!   - Magic: "BSH1" (4 bytes)
//!   - Version: u32 LE (4 bytes)
//!   - Rows, cols, piece filter, reserved: u8 each (4 bytes)
//!   - Node count: u32 LE (4 bytes)
//!   - Edge count: u32 LE (4 bytes)
//!   - Checksum: u64 LE xxhash of data section (8 bytes)
//!   - Reserved: 4 bytes (zeros)
//! - Data section:
//!   - Node hashes, `rows * cols` ASCII bytes each, commit order (root first)
//!   - Edges, `(u32 LE, u32 LE)` node indices, 8 bytes each
//!
//! Edge moves are not stored; they follow from the two endpoint states.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use bishops_core::{EngineResult, Explorer, GameSettings, PieceFilter, StateHash};
use xxhash_rust::xxh64::xxh64;

const MAGIC: &[u8; 4] = b"BSH1";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 32;
const EDGE_SIZE: usize = 8;

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn filter_byte(pieces: PieceFilter) -> u8 {
    match pieces {
        PieceFilter::All => 0,
        PieceFilter::White => 1,
        PieceFilter::Black => 2,
    }
}

fn filter_from_byte(b: u8) -> io::Result<PieceFilter> {
    match b {
        0 => Ok(PieceFilter::All),
        1 => Ok(PieceFilter::White),
        2 => Ok(PieceFilter::Black),
        other => Err(invalid(format!("Unknown piece filter byte: {other}"))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Checkpoint {
    pub settings: GameSettings,
    pub hashes: Vec<StateHash>,
    pub edges: Vec<(u32, u32)>,
}

impl Checkpoint {
    /// Snapshot every committed state and edge.
    pub fn from_explorer(explorer: &Explorer) -> Checkpoint {
        Checkpoint {
            settings: explorer.settings(),
            hashes: explorer
                .registry()
                .iter()
                .map(|(_, game)| game.hash().clone())
                .collect(),
            edges: explorer
                .graph()
                .edges()
                .map(|(a, b)| (a.0, b.0))
                .collect(),
        }
    }

    /// Rebuild the explorer, resequenced and with fresh tallies.
    pub fn to_explorer(&self) -> EngineResult<Explorer> {
        Explorer::restore(self.settings, &self.hashes, &self.edges)
    }

    pub fn encode(&self) -> Vec<u8> {
        let squares = self.settings.squares();
        let mut data =
            Vec::with_capacity(self.hashes.len() * squares + self.edges.len() * EDGE_SIZE);
        for hash in &self.hashes {
            data.extend_from_slice(hash.as_str().as_bytes());
        }
        for &(a, b) in &self.edges {
            data.extend_from_slice(&a.to_le_bytes());
            data.extend_from_slice(&b.to_le_bytes());
        }

        let mut out = Vec::with_capacity(HEADER_SIZE + data.len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&[
            self.settings.rows,
            self.settings.cols,
            filter_byte(self.settings.pieces),
            0,
        ]);
        out.extend_from_slice(&(self.hashes.len() as u32).to_le_bytes());
        out.extend_from_slice(&(self.edges.len() as u32).to_le_bytes());
        out.extend_from_slice(&xxh64(&data, 0).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // Reserved
        out.extend_from_slice(&data);
        out
    }

    pub fn decode(bytes: &[u8]) -> io::Result<Checkpoint> {
        if bytes.len() < HEADER_SIZE {
            return Err(invalid("Checkpoint header truncated"));
        }
        let (header, data) = bytes.split_at(HEADER_SIZE);

        if &header[0..4] != MAGIC {
            return Err(invalid("Invalid checkpoint magic"));
        }
        let version = le_u32(&header[4..8]);
        if version != VERSION {
            return Err(invalid(format!("Unsupported checkpoint version: {version}")));
        }

        let settings = GameSettings::new(header[8], header[9], filter_from_byte(header[10])?);
        settings
            .validate()
            .map_err(|e| invalid(e.to_string()))?;

        let node_count = le_u32(&header[12..16]) as usize;
        let edge_count = le_u32(&header[16..20]) as usize;
        let mut checksum = [0u8; 8];
        checksum.copy_from_slice(&header[20..28]);
        let stored_checksum = u64::from_le_bytes(checksum);

        let squares = settings.squares();
        let expected = node_count * squares + edge_count * EDGE_SIZE;
        if data.len() != expected {
            return Err(invalid(format!(
                "Checkpoint data is {} bytes, header promises {expected}",
                data.len()
            )));
        }
        if xxh64(data, 0) != stored_checksum {
            return Err(invalid("Checkpoint checksum mismatch"));
        }

        let (node_bytes, edge_bytes) = data.split_at(node_count * squares);
        let hashes = node_bytes
            .chunks_exact(squares)
            .map(|chunk| {
                std::str::from_utf8(chunk)
                    .map(StateHash::new)
                    .map_err(|_| invalid("State hash is not ASCII"))
            })
            .collect::<io::Result<Vec<_>>>()?;
        let edges = edge_bytes
            .chunks_exact(EDGE_SIZE)
            .map(|chunk| (le_u32(&chunk[0..4]), le_u32(&chunk[4..8])))
            .collect();

        Ok(Checkpoint {
            settings,
            hashes,
            edges,
        })
    }

    /// Write to disk. Returns the number of states saved.
    pub fn save(&self, path: &Path) -> io::Result<usize> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&self.encode())?;
        writer.flush()?;
        Ok(self.hashes.len())
    }

    pub fn load(path: &Path) -> io::Result<Checkpoint> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Checkpoint::decode(&bytes)
    }

    /// File size for a given number of states and edges.
    pub fn estimate_size(settings: &GameSettings, nodes: usize, edges: usize) -> usize {
        HEADER_SIZE + nodes * settings.squares() + edges * EDGE_SIZE
    }
}
