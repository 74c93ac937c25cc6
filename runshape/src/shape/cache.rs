// Copyright 2026 the Runshape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;

use crate::lru_cache::LookupKey;

/// Identifies a face: the shaping face id and the index within a collection.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) struct FaceKey {
    face_id: u64,
    face_index: u32,
}

impl FaceKey {
    pub(crate) fn new(face_id: u64, face_index: u32) -> Self {
        Self {
            face_id,
            face_index,
        }
    }
}

impl LookupKey<FaceKey> for FaceKey {
    fn matches(&self, key: &FaceKey) -> bool {
        self == key
    }

    fn into_key(self) -> FaceKey {
        self
    }
}

/// Owned form of [`PlanKey`].
pub(crate) type PlanId = (
    FaceKey,
    harfrust::Direction,
    Option<harfrust::Script>,
    Option<harfrust::Language>,
    Box<[harfrust::Feature]>,
);

/// Everything a shape plan depends on, borrowing the feature list.
pub(crate) struct PlanKey<'a> {
    face: FaceKey,
    direction: harfrust::Direction,
    script: Option<harfrust::Script>,
    language: Option<&'a harfrust::Language>,
    features: &'a [harfrust::Feature],
}

impl<'a> PlanKey<'a> {
    pub(crate) fn new(
        face: FaceKey,
        direction: harfrust::Direction,
        script: Option<harfrust::Script>,
        language: Option<&'a harfrust::Language>,
        features: &'a [harfrust::Feature],
    ) -> Self {
        Self {
            face,
            direction,
            script,
            language,
            features,
        }
    }
}

impl LookupKey<PlanId> for PlanKey<'_> {
    fn matches(&self, key: &PlanId) -> bool {
        self.face == key.0
            && self.direction == key.1
            && self.script == key.2
            && self.language == key.3.as_ref()
            && self.features == &*key.4
    }

    fn into_key(self) -> PlanId {
        (
            self.face,
            self.direction,
            self.script,
            self.language.cloned(),
            self.features.into(),
        )
    }
}
