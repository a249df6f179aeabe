// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Platform;

node_kinds! {
    /// Kubernetes resource kinds.
    pub enum K8sKind in Platform::Kubernetes, registry KUBERNETES {
        Deployment => ("deployment", "Deployment", Compute),
        StatefulSet => ("statefulset", "StatefulSet", Compute),
        DaemonSet => ("daemonset", "DaemonSet", Compute),
        Job => ("job", "Job", Compute),
        Pod => ("pod", "Pod", Compute),
        Service => ("service", "Service", Network),
        Ingress => ("ingress", "Ingress", Network),
        Pvc => ("pvc", "PVC", Storage),
        Pv => ("pv", "PV", Storage),
        StorageClass => ("storageclass", "StorageClass", Storage),
        ConfigMap => ("configmap", "ConfigMap", Config),
        Secret => ("secret", "Secret", Config),
        Hpa => ("hpa", "HPA", Config),
        ReplicaSet => ("replicaset", "ReplicaSet", Compute),
    }
}
