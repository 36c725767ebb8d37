//! Fixed-size multi-channel blocks and the reusable output pool.

use serde::{Deserialize, Serialize};

/// One block of audio: a sample array per channel, all the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block {
    channels: Vec<Vec<f32>>,
}

impl Block {
    /// Create a zeroed block.
    pub fn new(channels: usize, block_size: usize) -> Self {
        Self {
            channels: vec![vec![0.0; block_size]; channels],
        }
    }

    pub fn from_channels(channels: Vec<Vec<f32>>) -> Self {
        Self { channels }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channel_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        self.channels.get_mut(index).map(Vec::as_mut_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [Vec<f32>] {
        &mut self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    pub fn fill(&mut self, value: f32) {
        for channel in &mut self.channels {
            channel.fill(value);
        }
    }
}

/// `batch_size` blocks allocated once and overwritten in place on every read.
#[derive(Debug, Clone)]
pub struct BlockPool {
    blocks: Vec<Block>,
}

impl BlockPool {
    pub fn new(batch_size: usize, channels: usize, block_size: usize) -> Self {
        Self {
            blocks: (0..batch_size)
                .map(|_| Block::new(channels, block_size))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    /// Copy the pool into owned blocks (for handing across a thread boundary).
    pub fn to_vec(&self) -> Vec<Block> {
        self.blocks.clone()
    }
}
