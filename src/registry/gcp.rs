// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Platform;

node_kinds! {
    /// Google Cloud service kinds.
    pub enum GcpKind in Platform::Gcp, registry GCP {
        Gce => ("gce", "GCE", Compute),
        Gke => ("gke", "GKE", Compute),
        ComputeEngine => ("computeengine", "Compute Engine", Compute),
        Functions => ("functions", "Cloud Functions", Compute),
        Sql => ("sql", "Cloud SQL", Database),
        Firestore => ("firestore", "Firestore", Database),
        BigTable => ("bigtable", "Bigtable", Database),
        Spanner => ("spanner", "Spanner", Database),
        LoadBalancing => ("loadbalancing", "Load Balancing", Network),
        Dns => ("dns", "Cloud DNS", Network),
        Vpc => ("vpc", "VPC", Network),
        Gcs => ("gcs", "Cloud Storage", Storage),
        PersistentDisk => ("persistentdisk", "Persistent Disk", Storage),
        BigQuery => ("bigquery", "BigQuery", Analytics),
        Dataflow => ("dataflow", "Dataflow", Analytics),
        Pubsub => ("pubsub", "Pub/Sub", Analytics),
    }
}
