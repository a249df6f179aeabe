// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Type registries mapping platform keywords to drawable node kinds.
//!
//! Each platform has one static, ordered table. Lookups lower-case the keyword first, so
//! `"Deployment"` and `"deployment"` resolve to the same kind.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! node_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident in $platform:expr, registry $registry:ident {
            $($variant:ident => ($keyword:literal, $title:literal, $category:ident),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant,)+
        }

        impl $crate::registry::DrawableNode for $name {
            fn platform(self) -> $crate::registry::Platform {
                $platform
            }

            fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $keyword,)+
                }
            }

            fn title(self) -> &'static str {
                match self {
                    $(Self::$variant => $title,)+
                }
            }

            fn category(self) -> $crate::registry::Category {
                match self {
                    $(Self::$variant => $crate::registry::Category::$category,)+
                }
            }
        }

        pub static $registry: $crate::registry::Registry<$name> =
            $crate::registry::Registry::new($platform, &[$(($keyword, $name::$variant),)+]);
    };
}

pub mod aws;
pub mod gcp;
pub mod kubernetes;

pub use aws::{AwsKind, AWS};
pub use gcp::{GcpKind, GCP};
pub use kubernetes::{K8sKind, KUBERNETES};

/// Target platform of one diagram pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Kubernetes,
    Aws,
    Gcp,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Kubernetes, Platform::Aws, Platform::Gcp];

    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Kubernetes => "build-cluster-diagram",
            Self::Aws => "build-cloud-a-diagram",
            Self::Gcp => "build-cloud-b-diagram",
        }
    }

    /// Tool name used by earlier releases of the server; still dispatched.
    pub fn legacy_tool_name(self) -> &'static str {
        match self {
            Self::Kubernetes => "build-kubernetes-diagram",
            Self::Aws => "build-aws-diagram",
            Self::Gcp => "build-gcp-diagram",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.tool_name() == name || platform.legacy_tool_name() == name)
    }

    pub fn default_diagram_name(self) -> &'static str {
        match self {
            Self::Kubernetes => "k8s-architecture",
            Self::Aws => "aws-architecture",
            Self::Gcp => "gcp-architecture",
        }
    }

    pub fn default_group_label(self) -> &'static str {
        match self {
            Self::Kubernetes => "Cluster",
            Self::Aws | Self::Gcp => "VPC",
        }
    }

    /// Name of the request field holding the groups.
    pub fn group_field(self) -> &'static str {
        match self {
            Self::Kubernetes => "clusters",
            Self::Aws | Self::Gcp => "vpcs",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Kubernetes => "Kubernetes",
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Broad service family; drives the node colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Compute,
    Network,
    Storage,
    Database,
    Config,
    Integration,
    Analytics,
}

impl Category {
    pub fn fill_color(self) -> &'static str {
        match self {
            Self::Compute => "#e8f0fe",
            Self::Network => "#e6f4ea",
            Self::Storage => "#fef7e0",
            Self::Database => "#fce8e6",
            Self::Config => "#f3e8fd",
            Self::Integration => "#e4f7fb",
            Self::Analytics => "#fde7f3",
        }
    }

    pub fn stroke_color(self) -> &'static str {
        match self {
            Self::Compute => "#1a73e8",
            Self::Network => "#188038",
            Self::Storage => "#e37400",
            Self::Database => "#d93025",
            Self::Config => "#9334e6",
            Self::Integration => "#129eaf",
            Self::Analytics => "#d01884",
        }
    }
}

/// A node kind that can be resolved from a registry and drawn.
///
/// Implemented by each platform's kind enum so the assembly pipeline and the layout
/// can be written once and parameterised by registry.
pub trait DrawableNode: Copy + fmt::Debug + Send + Sync + 'static {
    fn platform(self) -> Platform;

    /// The lower-case registry keyword.
    fn keyword(self) -> &'static str;

    /// Human-readable kind, drawn above the component name.
    fn title(self) -> &'static str;

    fn category(self) -> Category;
}

/// Static keyword → node-kind table for one platform.
pub struct Registry<K: 'static> {
    platform: Platform,
    entries: &'static [(&'static str, K)],
}

impl<K: 'static> Registry<K> {
    pub const fn new(platform: Platform, entries: &'static [(&'static str, K)]) -> Self {
        Self { platform, entries }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: DrawableNode> Registry<K> {
    pub fn lookup(&self, keyword: &str) -> Option<K> {
        let keyword = keyword.to_lowercase();
        self.entries.iter().find(|(candidate, _)| *candidate == keyword).map(|(_, kind)| *kind)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&'static str, K)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(keyword, _)| *keyword)
    }
}

impl<K: 'static> fmt::Debug for Registry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("platform", &self.platform)
            .field("entries", &self.entries.len())
            .finish()
    }
}
