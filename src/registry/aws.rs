// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Topodraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Topodraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::Platform;

node_kinds! {
    /// AWS service kinds.
    pub enum AwsKind in Platform::Aws, registry AWS {
        Ec2 => ("ec2", "EC2", Compute),
        Ecs => ("ecs", "ECS", Compute),
        Eks => ("eks", "EKS", Compute),
        Lambda => ("lambda", "Lambda", Compute),
        Rds => ("rds", "RDS", Database),
        Dynamodb => ("dynamodb", "DynamoDB", Database),
        Elasticache => ("elasticache", "ElastiCache", Database),
        Redshift => ("redshift", "Redshift", Database),
        S3 => ("s3", "S3", Storage),
        Ebs => ("ebs", "EBS", Storage),
        Efs => ("efs", "EFS", Storage),
        Elb => ("elb", "ELB", Network),
        Alb => ("alb", "ALB", Network),
        Nlb => ("nlb", "NLB", Network),
        CloudFront => ("cloudfront", "CloudFront", Network),
        Route53 => ("route53", "Route 53", Network),
        Vpc => ("vpc", "VPC", Network),
        Sqs => ("sqs", "SQS", Integration),
        Sns => ("sns", "SNS", Integration),
        EventBridge => ("eventbridge", "EventBridge", Integration),
    }
}
