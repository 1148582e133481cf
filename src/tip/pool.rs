//! Shared `TipManager` escrow objects a tip can be deposited into.
//!
//! Versions are the *initial shared version* of each object and are pinned
//! here, never fetched. If an object is ever re-shared the pinned value must be
//! refreshed (through settings) or transactions touching it will fail
//! object-version validation at execution time.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::tip::selector::TipSelector;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedTipObject {
    pub object_id: String,
    pub version: u64,
}

/// Mainnet deployment.
pub const DEFAULT_TIP_OBJECTS: &[(&str, u64)] = &[
    ("0x188c9ea21b58b07fab5afdd0b30ffc33d5af74781454d1b008ee4ab620652fad", 730767796),
    ("0xe5153b62740b525424c9b71b590b4fef1e018d14280fb7ba76f4ba0573cef875", 730767797),
    ("0xff8ffbf8dd417d5ee5c3eafc01cda144bb07da8b4b72d4ec5fa85c1224bf6a86", 730767799),
    ("0x982f533710e83d674eb8f2a76fddfa0045ede3b8debdcbd06833f81deba43954", 730767801),
    ("0x8340398a9423ff01807e9fe2833ec790f8ccda8cea44853d2a1143dca4d47d48", 730767803),
    ("0xb9b8c50fa031b5bc1a2240ffef79d0e4d13cf7f50f2e3a0ad5dfca48db835be9", 730767805),
    ("0x533ebf862a2174b9df51ad0b6bef623639385268848f4c8fabbe550e0105e76a", 730767807),
    ("0x9cf05f5a8c639ab4e4b6bc5d79becce7412ee39d456f2151686dc48cec2c50ca", 730767809),
    ("0xd9a87b4ae9515ce28d04ae86882724027f1cf261c6cdecd974e0118dcdf33bbc", 730767811),
    ("0x4ee9abaa304c741501b6fd99821dd7e266583585c5f16579f6011b763c91d9e5", 730767813),
    ("0x3243eb0b3e2ec063e0216af50ca0fadcec6335f30349d859f6cfd652fdbaa3f3", 730767815),
    ("0x3290a3b00596d891c48570ecf87eec34a5974ab766915a3148e1017c6bf604a0", 730767817),
    ("0x0682d120eb5674cd092ddbdd31881000da4b469cb6ac2eda3c55f21b72db6810", 730767819),
    ("0x5661c7c2405820a14e1a1d159847d302dd893b4b582efc0c166dfef5ee7b25fa", 730767821),
    ("0x0ff2ba21bdfb2e5b360177de4df89d34f2f7594ce4185e9faa6f7d35e75669c2", 730767823),
    ("0xe341141150e28b479bd0514fec9a6e8326f3d75b07d60f00829d63010d334f12", 730767825),
    ("0x423b925119bbeece545e79dc1cea95bed121c99f1ddab32602654c4dea8c89f0", 730767827),
    ("0xe396ab823b1d85dc0f8428a915715becf10b49214e8d8068516197d858ff703a", 730767829),
    ("0x3de1876d8302a7dd1112c9847c617228a61a3b095ee9e1a9c66965c56edc3293", 730767831),
    ("0xf8492eda49bc53bd5fa5f3e1b18eafea303ff8c7776f2059b7c1c540ee459d95", 730767833),
    ("0x68bacf67761dd2d0bf811ce3970c649415ff111d0975cf90dc1ecf17aaebf18e", 730767835),
    ("0x853d4302d4aca976ab4c783d03836cf4b23220a67ee650bc72addcec93311ea3", 730767837),
    ("0x13b4f8a529014c76c97bd6fd96cd685f151ca9f858a2b0b1a43665a2311b78a0", 730767839),
    ("0x5511d6f18df30f78bbc18f0f67230bdb3e9b807345d357f5427babfaf8bb2973", 730767841),
    ("0x27d27f1546069d5cdcbd1343b281023ab3c5aa0bb3c266124361f7e416ced66c", 730767843),
    ("0x83f85ea5e76b4d1cd4e9f5a6583ee56afd7c1bc9c9612913d582ce8b833d9de2", 730767845),
];

/// Ordered, non-empty, read-only list of tip objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TipObjectPool {
    objects: Vec<SharedTipObject>,
}

impl TipObjectPool {
    pub fn new(objects: Vec<SharedTipObject>) -> Result<Self> {
        if objects.is_empty() {
            return Err(anyhow!("tip object pool must not be empty"));
        }
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[SharedTipObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, obj: &SharedTipObject) -> bool {
        self.objects.contains(obj)
    }

    /// Pick one entry with `selector`. Out-of-range picks wrap around.
    pub fn select(&self, selector: &dyn TipSelector) -> &SharedTipObject {
        let idx = selector.pick(self.objects.len()) % self.objects.len();
        &self.objects[idx]
    }
}

impl Default for TipObjectPool {
    fn default() -> Self {
        Self {
            objects: DEFAULT_TIP_OBJECTS
                .iter()
                .map(|(id, v)| SharedTipObject {
                    object_id: id.to_string(),
                    version: *v,
                })
                .collect(),
        }
    }
}
